/// Input-driven viewer state: loaded models, camera focal state and the
/// fixed motion matrices bound to each command.
use log::debug;
use nalgebra::Matrix4;

use crate::config::ViewerConfig;
use crate::error::ConfigError;
use crate::geometry::Model;
use crate::projection::Camera;
use crate::transform::{Axis, Transform};

/// A 2D drawing target
pub trait RenderSurface {
    /// Current drawable size in pixels
    fn viewport(&self) -> (u32, u32);
    fn clear(&mut self);
    /// Draw a small filled marker centred on `(x, y)`
    fn draw_point(&mut self, x: f64, y: f64);
    fn draw_line(&mut self, from: (f64, f64), to: (f64, f64));
}

/// Discrete viewer actions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Exit,
    FocalIncrease,
    FocalDecrease,
    MoveForward,
    MoveBack,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    RollClockwise,
    RollCounterClockwise,
}

/// What handling a command did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response {
    Redrawn,
    /// State unchanged, nothing drawn
    Ignored,
    Exit,
}

/// The loaded models.
///
/// There is no separate camera pose: moving the camera is applied as the
/// inverse motion of every model, accumulated into the vertex positions.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    models: Vec<Model>,
}

impl Scene {
    pub fn new(models: Vec<Model>) -> Self {
        Self { models }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn apply_camera_motion(&mut self, matrix: &Matrix4<f64>) {
        for model in &mut self.models {
            model.transform(matrix);
        }
    }
}

/// Scene matrices for each motion command, built once from configuration
#[derive(Debug, Clone)]
pub struct MotionTable {
    matrices: Vec<(Command, Matrix4<f64>)>,
}

impl MotionTable {
    pub fn new(config: &ViewerConfig) -> Self {
        let forward = config.depth_axis.forward();
        let up = config.depth_axis.up();
        let step = config.translation_step;
        let angle = config.rotation_step_radians();

        let matrices = vec![
            (Command::MoveForward, Transform::translation_along(forward, -step)),
            (Command::MoveBack, Transform::translation_along(forward, step)),
            (Command::MoveLeft, Transform::translation_along(Axis::X, step)),
            (Command::MoveRight, Transform::translation_along(Axis::X, -step)),
            (Command::MoveUp, Transform::translation_along(up, -step)),
            (Command::MoveDown, Transform::translation_along(up, step)),
            (Command::YawLeft, Transform::rotation(angle, up)),
            (Command::YawRight, Transform::rotation(-angle, up)),
            (Command::PitchUp, Transform::rotation(angle, Axis::X)),
            (Command::PitchDown, Transform::rotation(-angle, Axis::X)),
            (Command::RollCounterClockwise, Transform::rotation(angle, forward)),
            (Command::RollClockwise, Transform::rotation(-angle, forward)),
        ];

        Self { matrices }
    }

    pub fn get(&self, command: Command) -> Option<&Matrix4<f64>> {
        self.matrices
            .iter()
            .find(|(c, _)| *c == command)
            .map(|(_, m)| m)
    }
}

/// Owns the scene and camera and applies commands to them
#[derive(Debug, Clone)]
pub struct Viewer {
    scene: Scene,
    camera: Camera,
    motions: MotionTable,
    focal_step: f64,
}

impl Viewer {
    /// Build a viewer, rejecting configurations that `ViewerConfig::validate` rejects
    pub fn new(models: Vec<Model>, config: &ViewerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            scene: Scene::new(models),
            camera: config.camera()?,
            motions: MotionTable::new(config),
            focal_step: config.focal.step,
        })
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Apply `command`, redrawing `surface` when the view changed
    pub fn handle<S: RenderSurface + ?Sized>(&mut self, command: Command, surface: &mut S) -> Response {
        debug!("Handling {:?}", command);
        match command {
            Command::Exit => Response::Exit,
            Command::FocalIncrease => self.change_focal(self.focal_step, surface),
            Command::FocalDecrease => self.change_focal(-self.focal_step, surface),
            motion => match self.motions.get(motion) {
                Some(matrix) => {
                    self.scene.apply_camera_motion(matrix);
                    self.redraw(surface);
                    Response::Redrawn
                }
                None => Response::Ignored,
            },
        }
    }

    fn change_focal<S: RenderSurface + ?Sized>(&mut self, delta: f64, surface: &mut S) -> Response {
        if !self.camera.adjust_focal(delta) {
            debug!(
                "Focal length {} + {} is out of bounds, ignoring",
                self.camera.focal(),
                delta
            );
            return Response::Ignored;
        }
        self.redraw(surface);
        Response::Redrawn
    }

    /// Clear the surface and draw every model from scratch
    pub fn redraw<S: RenderSurface + ?Sized>(&self, surface: &mut S) {
        let (width, height) = surface.viewport();
        surface.clear();
        for model in self.scene.models() {
            let frame = self.camera.project_model(model, width, height);
            for &(x, y) in &frame.points {
                surface.draw_point(x, y);
            }
            for &(from, to) in &frame.lines {
                surface.draw_line(from, to);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{vertex, Edge};
    use crate::projection::DepthAxis;

    #[derive(Debug, PartialEq)]
    enum Call {
        Clear,
        Point(f64, f64),
        Line((f64, f64), (f64, f64)),
    }

    /// Records draw calls instead of rendering them
    struct Recorder {
        size: (u32, u32),
        calls: Vec<Call>,
    }

    impl Recorder {
        fn new(width: u32, height: u32) -> Self {
            Self {
                size: (width, height),
                calls: Vec::new(),
            }
        }
    }

    impl RenderSurface for Recorder {
        fn viewport(&self) -> (u32, u32) {
            self.size
        }

        fn clear(&mut self) {
            self.calls.push(Call::Clear);
        }

        fn draw_point(&mut self, x: f64, y: f64) {
            self.calls.push(Call::Point(x, y));
        }

        fn draw_line(&mut self, from: (f64, f64), to: (f64, f64)) {
            self.calls.push(Call::Line(from, to));
        }
    }

    fn segment() -> Model {
        Model::new(
            vec![vertex(0.0, 0.0, 200.0), vertex(10.0, 0.0, 200.0)],
            vec![Edge::new(0, 1)],
        )
        .unwrap()
    }

    fn config_with_focal(initial: f64) -> ViewerConfig {
        let mut config = ViewerConfig::default();
        config.focal.initial = initial;
        config
    }

    #[test]
    fn test_redraw_protocol() {
        let viewer = Viewer::new(vec![segment()], &config_with_focal(100.0)).unwrap();
        let mut surface = Recorder::new(500, 500);
        viewer.redraw(&mut surface);
        assert_eq!(
            surface.calls,
            vec![
                Call::Clear,
                Call::Point(250.0, 250.0),
                Call::Point(255.0, 250.0),
                Call::Line((250.0, 250.0), (255.0, 250.0)),
            ]
        );
    }

    #[test]
    fn test_redraw_uses_current_viewport() {
        let viewer = Viewer::new(vec![segment()], &config_with_focal(100.0)).unwrap();
        let mut surface = Recorder::new(100, 40);
        viewer.redraw(&mut surface);
        assert_eq!(surface.calls[1], Call::Point(50.0, 20.0));
    }

    #[test]
    fn test_focal_increase_at_max_is_a_no_op() {
        let mut viewer = Viewer::new(vec![segment()], &config_with_focal(1000.0)).unwrap();
        let mut surface = Recorder::new(500, 500);
        assert_eq!(viewer.handle(Command::FocalIncrease, &mut surface), Response::Ignored);
        assert_eq!(viewer.camera().focal(), 1000.0);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_focal_decrease_redraws() {
        let mut viewer = Viewer::new(vec![segment()], &ViewerConfig::default()).unwrap();
        let mut surface = Recorder::new(500, 500);
        assert_eq!(viewer.handle(Command::FocalDecrease, &mut surface), Response::Redrawn);
        assert_eq!(viewer.camera().focal(), 490.0);
        assert_eq!(surface.calls, vec![Call::Clear]);
    }

    #[test]
    fn test_move_forward_brings_scene_closer() {
        let mut viewer = Viewer::new(vec![segment()], &config_with_focal(100.0)).unwrap();
        let mut surface = Recorder::new(500, 500);
        assert_eq!(viewer.handle(Command::MoveForward, &mut surface), Response::Redrawn);
        let v = viewer.scene().models()[0].vertices()[1];
        assert!((v - vertex(10.0, 0.0, 150.0)).norm() < 1e-9);
        // scale = 100 / 150
        assert!(surface
            .calls
            .contains(&Call::Point(100.0 / 150.0 * 10.0 + 250.0, 250.0)));
    }

    #[test]
    fn test_motion_is_cumulative_and_reversible() {
        let mut viewer = Viewer::new(vec![segment(), Model::cube(100.0)], &ViewerConfig::default()).unwrap();
        let before: Vec<Model> = viewer.scene().models().to_vec();
        let mut surface = Recorder::new(500, 500);
        let pairs = [
            (Command::MoveLeft, Command::MoveRight),
            (Command::MoveUp, Command::MoveDown),
            (Command::YawLeft, Command::YawRight),
            (Command::PitchUp, Command::PitchDown),
            (Command::RollClockwise, Command::RollCounterClockwise),
        ];
        for (there, back) in pairs {
            viewer.handle(there, &mut surface);
            viewer.handle(there, &mut surface);
            viewer.handle(back, &mut surface);
            viewer.handle(back, &mut surface);
        }
        for (model, original) in viewer.scene().models().iter().zip(&before) {
            for (a, b) in model.vertices().iter().zip(original.vertices()) {
                assert!((a - b).norm() < 1e-6);
            }
        }
    }

    #[test]
    fn test_motion_table_follows_depth_axis() {
        let mut config = ViewerConfig::default();
        config.depth_axis = DepthAxis::Y;
        let table = MotionTable::new(&config);
        let forward = table.get(Command::MoveForward).unwrap();
        assert!((forward - Transform::translation(0.0, -50.0, 0.0)).norm() < 1e-12);
        let up = table.get(Command::MoveUp).unwrap();
        assert!((up - Transform::translation(0.0, 0.0, -50.0)).norm() < 1e-12);
        let roll = table.get(Command::RollCounterClockwise).unwrap();
        assert!((roll - Transform::rotation(5f64.to_radians(), Axis::Y)).norm() < 1e-12);
    }

    #[test]
    fn test_exit() {
        let mut viewer = Viewer::new(Vec::new(), &ViewerConfig::default()).unwrap();
        let mut surface = Recorder::new(500, 500);
        assert_eq!(viewer.handle(Command::Exit, &mut surface), Response::Exit);
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let err = Viewer::new(vec![segment()], &config_with_focal(1200.0)).unwrap_err();
        assert!(matches!(err, ConfigError::FocalOutOfBounds { .. }));

        let mut config = ViewerConfig::default();
        config.focal.step = f64::NAN;
        assert!(matches!(
            Viewer::new(Vec::new(), &config),
            Err(ConfigError::NonFinite {
                name: "focal step",
                ..
            })
        ));
    }
}
