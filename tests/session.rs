extern crate gridraster;
extern crate env_logger;

mod common;

use gridraster::nalgebra::{Point3, Vector3};

use gridraster::color::predefined::red;
use gridraster::pipeline::unlit;
use gridraster::{rasterize, Animation, Camera, Coordinate, DegeneratePolicy, Dimensions, FaceWinding,
                 FrameParams, Light, RenderError, Rasterizer};

use common::{config, init_logging, target, Pixel, ScreenMesh, BACKGROUND};

const UNTOUCHED: [u8; 4] = [7, 7, 7, 7];

const POSITIONS: [f32; 9] = [-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 1.0, 0.0];
const COLORS: [f32; 9] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0];
const NORMALS: [f32; 9] = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];
const INDICES: [u32; 3] = [0, 1, 2];

fn camera(dimensions: Dimensions) -> Camera {
    Camera::new(Point3::new(0.0, 0.0, 3.0), Point3::origin(), dimensions)
}

fn center(dimensions: Dimensions) -> usize {
    Coordinate::new(dimensions.width / 2, dimensions.height / 2).into_index(dimensions)
}

#[test]
fn one_shot_renders_through_the_camera() {
    init_logging();

    let dimensions = Dimensions::new(16, 16);
    let mut image = target(dimensions);

    let stats = rasterize(&mut image, &camera(dimensions), 0.0, &POSITIONS, &COLORS, &NORMALS, &INDICES, config()).unwrap();

    assert_eq!(stats.vertices, 3);
    assert_eq!(stats.triangles, 1);
    assert_eq!(stats.visible, 1);
    assert!(stats.fragments > 0);

    let lit = image[center(dimensions)];

    assert!(lit[0] > 0 && lit[1] == 0 && lit[2] == 0, "center pixel {:?}", lit);
    assert_eq!(image[0], BACKGROUND);
}

#[test]
fn light_in_front_outshines_light_behind() {
    init_logging();

    let dimensions = Dimensions::new(16, 16);

    let mut front = target(dimensions);
    let mut behind = target(dimensions);

    let front_light = config().with_light(Light::new_white(Point3::new(0.0, 0.0, 3.0), 1.0));
    let back_light = config().with_light(Light::new_white(Point3::new(0.0, 0.0, -3.0), 1.0));

    rasterize(&mut front, &camera(dimensions), 0.0, &POSITIONS, &COLORS, &NORMALS, &INDICES, front_light).unwrap();
    rasterize(&mut behind, &camera(dimensions), 0.0, &POSITIONS, &COLORS, &NORMALS, &INDICES, back_light).unwrap();

    let (front, behind) = (front[center(dimensions)], behind[center(dimensions)]);

    assert_eq!(front[0], 255);
    // Ambient only
    assert!(behind[0] > 0 && behind[0] < 40, "{:?}", behind);
}

#[test]
fn contract_violations_leave_the_target_untouched() {
    init_logging();

    let dimensions = Dimensions::new(16, 16);
    let camera = camera(dimensions);

    let mut image = vec![UNTOUCHED; dimensions.area()];

    assert_eq!(rasterize(&mut image, &camera, 0.0, &POSITIONS[..8], &COLORS, &NORMALS, &INDICES, config()),
               Err(RenderError::RaggedArray { name: "position", len: 8 }));

    assert_eq!(rasterize(&mut image, &camera, 0.0, &POSITIONS, &COLORS[..6], &NORMALS, &INDICES, config()),
               Err(RenderError::MismatchedAttribute { name: "color", expected: 3, actual: 2 }));

    assert_eq!(rasterize(&mut image, &camera, 0.0, &POSITIONS, &COLORS, &NORMALS, &[0, 1], config()),
               Err(RenderError::RaggedArray { name: "index", len: 2 }));

    assert_eq!(rasterize(&mut image, &camera, 0.0, &POSITIONS, &COLORS, &NORMALS, &[0, 1, 3], config()),
               Err(RenderError::IndexOutOfRange { triangle: 0, index: 3, vertex_count: 3 }));

    assert_eq!(rasterize(&mut image[1..], &camera, 0.0, &POSITIONS, &COLORS, &NORMALS, &INDICES, config()),
               Err(RenderError::TargetSizeMismatch { expected: 256, actual: 255 }));

    let blind = Camera::new(Point3::origin(), Point3::origin(), dimensions);

    match rasterize(&mut image, &blind, 0.0, &POSITIONS, &COLORS, &NORMALS, &INDICES, config()) {
        Err(RenderError::InvalidCamera(_)) => {}
        other => panic!("expected an invalid camera error, got {:?}", other),
    }

    assert!(image.iter().all(|&pixel| pixel == UNTOUCHED));
}

#[test]
fn session_rejects_a_foreign_resolution() {
    init_logging();

    let dimensions = Dimensions::new(16, 16);
    let mesh = ScreenMesh::new(dimensions).build();

    let mut rasterizer = Rasterizer::new(dimensions, config()).unwrap();
    let mut image = vec![UNTOUCHED; dimensions.area()];

    assert_eq!(rasterizer.render_frame(&mut image, &camera(Dimensions::new(8, 8)), 0.0, &mesh),
               Err(RenderError::ResolutionMismatch { session: dimensions, camera: Dimensions::new(8, 8) }));

    assert!(image.iter().all(|&pixel| pixel == UNTOUCHED));
}

#[test]
fn unusable_resolutions_fail_before_any_frame() {
    init_logging();

    match Rasterizer::new(Dimensions::new(0, 4), config()) {
        Err(RenderError::InvalidDimensions { width: 0, height: 4 }) => {}
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("zero width accepted"),
    }

    match Rasterizer::new(Dimensions::new(u32::max_value(), u32::max_value()), config()) {
        Err(RenderError::ResourceExhausted { .. }) => {}
        Err(other) => panic!("unexpected error {:?}", other),
        Ok(_) => panic!("impossible allocation succeeded"),
    }
}

#[test]
fn reject_policy_fails_the_frame() {
    init_logging();

    let dimensions = Dimensions::new(4, 4);

    let mesh = ScreenMesh::new(dimensions)
        .triangle([Pixel(0.0, 0.0, 0.5), Pixel(4.0, 0.0, 0.5), Pixel(0.0, 4.0, 0.5)], red())
        .triangle([Pixel(1.0, 1.0, 0.5), Pixel(1.0, 1.0, 0.5), Pixel(3.0, 3.0, 0.5)], red())
        .build();

    let mut image = vec![UNTOUCHED; dimensions.area()];

    let mut strict = Rasterizer::new(dimensions, config().with_degenerate_policy(DegeneratePolicy::Reject)).unwrap();

    assert_eq!(strict.render(&mut image, &FrameParams::identity(), &mesh),
               Err(RenderError::DegenerateTriangle { triangle: 1 }));

    assert!(image.iter().all(|&pixel| pixel == UNTOUCHED));

    let mut lenient = Rasterizer::new(dimensions, config()).unwrap();

    let stats = lenient.render(&mut image, &FrameParams::identity(), &mesh).unwrap();

    assert_eq!((stats.visible, stats.degenerate), (1, 1));
    assert!(image.iter().all(|&pixel| pixel != UNTOUCHED));
}

#[test]
fn vertex_behind_the_eye_drops_its_triangle() {
    init_logging();

    let dimensions = Dimensions::new(16, 16);
    let mut image = target(dimensions);

    let positions = [-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 0.0, 0.0, 5.0];

    let stats = rasterize(&mut image, &camera(dimensions), 0.0, &positions, &COLORS, &NORMALS, &INDICES, config()).unwrap();

    assert_eq!(stats.degenerate, 1);
    assert_eq!(stats.fragments, 0);
    assert!(image.iter().all(|&pixel| pixel == BACKGROUND));
}

#[test]
fn culling_follows_the_animation() {
    init_logging();

    let dimensions = Dimensions::new(16, 16);

    // Facing the camera, the triangle is clockwise on screen
    let config = config()
        .with_cull_faces(Some(FaceWinding::Clockwise))
        .with_animation(Animation::spin(Vector3::y_axis(), ::std::f32::consts::PI));

    let mut image = target(dimensions);

    let facing = rasterize(&mut image, &camera(dimensions), 0.0, &POSITIONS, &COLORS, &NORMALS, &INDICES, config.clone()).unwrap();

    assert_eq!(facing.culled, 1);
    assert!(image.iter().all(|&pixel| pixel == BACKGROUND));

    // Half a turn later the back is visible
    let turned = rasterize(&mut image, &camera(dimensions), 1.0, &POSITIONS, &COLORS, &NORMALS, &INDICES, config).unwrap();

    assert_eq!(turned.visible, 1);
    assert_ne!(image[center(dimensions)], BACKGROUND);
}

#[test]
fn released_session_reallocates_on_the_next_frame() {
    init_logging();

    let dimensions = Dimensions::new(16, 16);
    let camera = camera(dimensions);

    let mesh = gridraster::Mesh::from_flat(&POSITIONS, &COLORS, &NORMALS, &INDICES).unwrap();

    let mut rasterizer = Rasterizer::new(dimensions, config()).unwrap();

    let mut before = target(dimensions);
    rasterizer.render_frame(&mut before, &camera, 0.0, &mesh).unwrap();

    assert!(rasterizer.is_allocated());
    assert!(rasterizer.color_buffer().unwrap().get(Coordinate::new(8, 8)).unwrap().x > 0.0);

    rasterizer.release();

    assert!(!rasterizer.is_allocated());
    assert!(rasterizer.color_buffer().is_none());
    assert!(rasterizer.fragments().is_none());

    let mut after = target(dimensions);
    rasterizer.render_frame(&mut after, &camera, 0.0, &mesh).unwrap();

    assert!(rasterizer.is_allocated());
    assert!(before == after);
}

#[test]
fn projected_quad_has_no_cracks_or_overlaps() {
    init_logging();

    let dimensions = Dimensions::new(48, 40);

    let camera = Camera::new(Point3::new(0.4, 0.3, 3.0), Point3::new(0.1, -0.05, 0.0), dimensions);

    let positions = [-1.0, -1.0, 0.0, 1.0, -1.0, 0.0, 1.0, 1.0, 0.0, -1.0, 1.0, 0.0];
    let colors = [1.0; 12];
    let normals = [0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0];

    // Both halves share the diagonal 0 -> 2
    let mesh = gridraster::Mesh::from_flat(&positions, &colors, &normals, &[0, 1, 2, 0, 2, 3]).unwrap();

    let spin = Animation::spin(gridraster::nalgebra::Unit::new_normalize(Vector3::new(1.0, 2.0, 0.5)), 1.0);

    let mut rasterizer = Rasterizer::new(dimensions, config().with_animation(spin)).unwrap();

    for &time in &[0.0, 0.37, 0.81, 1.3, 2.2, 2.9] {
        let params = FrameParams::from_camera(&camera, time, &spin).unwrap();

        let mut image = target(dimensions);

        let stats = rasterizer.render_with(&mut image, &params, &mesh, unlit).unwrap();

        let covered = |x: u32, y: u32| image[Coordinate::new(x, y).into_index(dimensions)] != BACKGROUND;

        let total = image.iter().filter(|&&pixel| pixel != BACKGROUND).count();

        // One fragment per covered pixel, so no pixel was claimed by both halves
        assert_eq!(stats.fragments, total, "time {}", time);

        // The projected quad is convex, so a pixel left uncovered between covered ones is a crack
        for y in 0..dimensions.height {
            let row: Vec<u32> = (0..dimensions.width).filter(|&x| covered(x, y)).collect();

            if let (Some(first), Some(last)) = (row.first(), row.last()) {
                assert_eq!((last - first + 1) as usize, row.len(), "crack in row {} at time {}", y, time);
            }
        }

        for x in 0..dimensions.width {
            let column: Vec<u32> = (0..dimensions.height).filter(|&y| covered(x, y)).collect();

            if let (Some(first), Some(last)) = (column.first(), column.last()) {
                assert_eq!((last - first + 1) as usize, column.len(), "crack in column {} at time {}", x, time);
            }
        }
    }
}
