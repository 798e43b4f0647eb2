use crate::engine::camera::fly_camera::ViewerCamera;
use crate::engine::loading::progress::LoadingProgress;
use crate::error::SkyboxError;
use bevy::asset::{LoadState, RenderAssetUsages};
use bevy::core_pipeline::Skybox;
use bevy::prelude::*;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureViewDescriptor, TextureViewDimension,
};

const SKYBOX_BRIGHTNESS: f32 = 1000.0;

/// Handles for the six face images, in +X -X +Y -Y +Z -Z order.
#[derive(Resource, Default)]
pub struct SkyboxLoader {
    faces: Vec<Handle<Image>>,
    settled: bool,
}

impl SkyboxLoader {
    pub fn request(asset_server: &AssetServer, paths: &[String]) -> Self {
        Self {
            faces: paths.iter().map(|path| asset_server.load(path)).collect(),
            settled: false,
        }
    }
}

/// Stack six equally sized faces into a single cube-map image.
pub fn assemble_cubemap(faces: &[&Image]) -> Result<Image, SkyboxError> {
    if faces.len() != 6 {
        return Err(SkyboxError::FaceCount(faces.len()));
    }

    let first = faces[0];
    let (width, height) = (first.width(), first.height());
    let format = first.texture_descriptor.format;
    let mut data = Vec::new();

    for (index, face) in faces.iter().enumerate() {
        if face.width() != width || face.height() != height {
            return Err(SkyboxError::SizeMismatch {
                index,
                width: face.width(),
                height: face.height(),
                expected_width: width,
                expected_height: height,
            });
        }
        if face.texture_descriptor.format != format {
            return Err(SkyboxError::FormatMismatch {
                index,
                found: format!("{:?}", face.texture_descriptor.format),
                expected: format!("{:?}", format),
            });
        }
        let Some(bytes) = face.data.as_ref() else {
            return Err(SkyboxError::MissingData(index));
        };
        data.extend_from_slice(bytes);
    }

    let mut cubemap = Image::new(
        Extent3d {
            width,
            height,
            depth_or_array_layers: 6,
        },
        TextureDimension::D2,
        data,
        format,
        RenderAssetUsages::RENDER_WORLD,
    );
    cubemap.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    Ok(cubemap)
}

/// Attach the skybox to the viewer camera once every face has loaded.
pub fn assemble_skybox_when_ready(
    mut loader: ResMut<SkyboxLoader>,
    mut loading_progress: ResMut<LoadingProgress>,
    mut images: ResMut<Assets<Image>>,
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    camera: Query<Entity, With<ViewerCamera>>,
) {
    if loader.settled || loader.faces.is_empty() {
        return;
    }

    let mut all_loaded = true;
    let mut failed = false;
    for handle in &loader.faces {
        match asset_server.get_load_state(handle) {
            Some(LoadState::Loaded) => {}
            Some(LoadState::Failed(err)) => {
                error!("Error loading skybox face: {}", err);
                failed = true;
            }
            _ => all_loaded = false,
        }
    }
    if failed {
        loader.settled = true;
        return;
    }
    if !all_loaded {
        return;
    }

    loader.settled = true;
    let faces: Vec<&Image> = loader.faces.iter().filter_map(|h| images.get(h)).collect();

    match assemble_cubemap(&faces) {
        Ok(cubemap) => {
            let image = images.add(cubemap);
            if let Ok(camera) = camera.single() {
                commands.entity(camera).insert(Skybox {
                    image,
                    brightness: SKYBOX_BRIGHTNESS,
                    rotation: Quat::IDENTITY,
                });
                loading_progress.skybox_ready = true;
                info!("✓ Skybox assembled");
            }
        }
        Err(err) => error!("Skybox unavailable: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::render_resource::TextureFormat;

    fn face(size: u32, format: TextureFormat, pixel: &[u8]) -> Image {
        Image::new_fill(
            Extent3d {
                width: size,
                height: size,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            pixel,
            format,
            RenderAssetUsages::MAIN_WORLD,
        )
    }

    #[test]
    fn six_matching_faces_become_a_cube_map() {
        let faces: Vec<Image> = (0..6u8)
            .map(|i| face(4, TextureFormat::Rgba8UnormSrgb, &[i, i, i, 255]))
            .collect();
        let refs: Vec<&Image> = faces.iter().collect();

        let cubemap = assemble_cubemap(&refs).unwrap();
        assert_eq!(cubemap.texture_descriptor.size.depth_or_array_layers, 6);
        assert_eq!(
            cubemap.texture_view_descriptor.as_ref().unwrap().dimension,
            Some(TextureViewDimension::Cube)
        );

        let data = cubemap.data.as_ref().unwrap();
        assert_eq!(data.len(), 6 * 4 * 4 * 4);
        // Faces are stacked in the order given.
        assert_eq!(data[5 * 64], 5);
    }

    #[test]
    fn wrong_face_count_is_rejected() {
        let single = face(4, TextureFormat::Rgba8UnormSrgb, &[0, 0, 0, 255]);
        assert_eq!(
            assemble_cubemap(&[&single]).unwrap_err(),
            SkyboxError::FaceCount(1)
        );
    }

    #[test]
    fn mismatched_face_size_is_rejected() {
        let mut faces: Vec<Image> = (0..6)
            .map(|_| face(4, TextureFormat::Rgba8UnormSrgb, &[0, 0, 0, 255]))
            .collect();
        faces[3] = face(8, TextureFormat::Rgba8UnormSrgb, &[0, 0, 0, 255]);
        let refs: Vec<&Image> = faces.iter().collect();

        assert!(matches!(
            assemble_cubemap(&refs),
            Err(SkyboxError::SizeMismatch { index: 3, .. })
        ));
    }

    #[test]
    fn mismatched_face_format_is_rejected() {
        let mut faces: Vec<Image> = (0..6)
            .map(|_| face(4, TextureFormat::Rgba8UnormSrgb, &[0, 0, 0, 255]))
            .collect();
        faces[5] = face(4, TextureFormat::Rgba8Unorm, &[0, 0, 0, 255]);
        let refs: Vec<&Image> = faces.iter().collect();

        assert!(matches!(
            assemble_cubemap(&refs),
            Err(SkyboxError::FormatMismatch { index: 5, .. })
        ));
    }
}
