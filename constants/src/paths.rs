/// Scene manifest, relative to the asset root.
pub const MANIFEST_PATH: &str = "solar_system.json";

pub const INTRO_AUDIO_PATH: &str = "audio/intro.mp3";
pub const OUTRO_AUDIO_PATH: &str = "audio/outro.mp3";

/// Cube faces in +X, -X, +Y, -Y, +Z, -Z order.
pub const SKYBOX_FACES: [&str; 6] = [
    "textures/skybox/corona_ft.png",
    "textures/skybox/corona_bk.png",
    "textures/skybox/corona_up.png",
    "textures/skybox/corona_dn.png",
    "textures/skybox/corona_rt.png",
    "textures/skybox/corona_lf.png",
];
