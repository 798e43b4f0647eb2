/// Circular orbit parameters. Rate is in radians per second of app time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitInfo {
    pub radius: f32,
    pub rate: f32,
}

pub struct BodyInfo {
    pub name: &'static str,
    pub model_path: &'static str,
    pub audio_path: &'static str,
    /// Self-rotation in radians per second.
    pub rotation_rate: f32,
    pub orbit: Option<OrbitInfo>,
    /// Distance along +X the tour camera stops short of the body centre.
    pub approach_offset: f32,
    pub info: &'static str,
}

/// Built-in catalog in load order. The Sun comes first and never orbits.
pub const BODY_CATALOG: &[BodyInfo] = &[
    BodyInfo {
        name: "Sun",
        model_path: "models/sun.glb",
        audio_path: "audio/sun.mp3",
        rotation_rate: 0.06,
        orbit: None,
        approach_offset: 2.0,
        info: "The Sun is a main-sequence star 1.39 million km across.",
    },
    BodyInfo {
        name: "Mercury",
        model_path: "models/mercury.glb",
        audio_path: "audio/mercury.mp3",
        rotation_rate: 0.24,
        orbit: Some(OrbitInfo {
            radius: 3.9,
            rate: 4.0,
        }),
        approach_offset: 1.0,
        info: "Mercury is the smallest planet.",
    },
    BodyInfo {
        name: "Venus",
        model_path: "models/venus.glb",
        audio_path: "audio/venus.mp3",
        rotation_rate: 0.12,
        orbit: Some(OrbitInfo {
            radius: 7.2,
            rate: 3.0,
        }),
        approach_offset: 1.0,
        info: "Venus is the hottest planet.",
    },
    BodyInfo {
        name: "Earth",
        model_path: "models/earth.glb",
        audio_path: "audio/earth.mp3",
        rotation_rate: 0.6,
        orbit: Some(OrbitInfo {
            radius: 10.0,
            rate: 2.0,
        }),
        approach_offset: 1.0,
        info: "Earth is the only planet known to host life.",
    },
    BodyInfo {
        name: "Mars",
        model_path: "models/mars.glb",
        audio_path: "audio/mars.mp3",
        rotation_rate: 0.54,
        orbit: Some(OrbitInfo {
            radius: 15.2,
            rate: 1.5,
        }),
        approach_offset: 1.0,
        info: "Mars is known as the red planet.",
    },
    BodyInfo {
        name: "Jupiter",
        model_path: "models/jupiter.glb",
        audio_path: "audio/jupiter.mp3",
        rotation_rate: 1.2,
        orbit: Some(OrbitInfo {
            radius: 52.0,
            rate: 0.8,
        }),
        approach_offset: 10.0,
        info: "Jupiter is the largest planet.",
    },
    BodyInfo {
        name: "Saturn",
        model_path: "models/saturn.glb",
        audio_path: "audio/saturn.mp3",
        rotation_rate: 1.08,
        orbit: Some(OrbitInfo {
            radius: 95.8,
            rate: 0.6,
        }),
        approach_offset: 10.0,
        info: "Saturn is famous for its rings.",
    },
    BodyInfo {
        name: "Uranus",
        model_path: "models/uranus.glb",
        audio_path: "audio/uranus.mp3",
        rotation_rate: 0.72,
        orbit: Some(OrbitInfo {
            radius: 191.8,
            rate: 0.4,
        }),
        approach_offset: 6.0,
        info: "Uranus spins on its side.",
    },
    BodyInfo {
        name: "Neptune",
        model_path: "models/neptune.glb",
        audio_path: "audio/neptune.mp3",
        rotation_rate: 0.66,
        orbit: Some(OrbitInfo {
            radius: 300.7,
            rate: 0.3,
        }),
        approach_offset: 6.0,
        info: "Neptune has the fastest winds.",
    },
];

pub fn get_body_info(name: &str) -> Option<&'static BodyInfo> {
    BODY_CATALOG.iter().find(|b| b.name == name)
}
