//! Model / view / projection / normal matrix bundle of a drawable

use glam::Mat4;

/// Matrices owned by each drawable body.
///
/// The normal matrix is kept in sync with the model-view matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    model: Mat4,
    view: Mat4,
    projection: Mat4,
    normal: Mat4,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            model: Mat4::IDENTITY,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            normal: Mat4::IDENTITY,
        }
    }
}

impl TransformState {
    pub fn set_model(&mut self, model: Mat4) {
        self.model = model;
        self.refresh_normal();
    }

    pub fn set_view(&mut self, view: Mat4) {
        self.view = view;
        self.refresh_normal();
    }

    pub fn set_projection(&mut self, projection: Mat4) {
        self.projection = projection;
    }

    fn refresh_normal(&mut self) {
        let model_view = self.model_view();
        // Zero-sized bodies have no inverse
        self.normal = if model_view.determinant().abs() > f32::EPSILON * f32::EPSILON {
            model_view.inverse().transpose()
        } else {
            Mat4::IDENTITY
        };
    }

    pub fn model(&self) -> Mat4 {
        self.model
    }

    pub fn view(&self) -> Mat4 {
        self.view
    }

    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    pub fn model_view(&self) -> Mat4 {
        self.view * self.model
    }

    pub fn mvp(&self) -> Mat4 {
        self.projection * self.view * self.model
    }

    /// Transpose of the inverse model-view matrix
    pub fn normal(&self) -> Mat4 {
        self.normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn normal_matrix_tracks_model_and_view() {
        let mut transform = TransformState::default();
        let model = Mat4::from_scale_rotation_translation(
            Vec3::splat(2.0),
            glam::Quat::from_rotation_y(0.7),
            Vec3::new(1.0, 2.0, 3.0),
        );
        transform.set_model(model);
        assert!(transform.normal().abs_diff_eq(model.inverse().transpose(), 1e-5));

        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -10.0));
        transform.set_view(view);
        assert!(transform.normal().abs_diff_eq((view * model).inverse().transpose(), 1e-5));
    }

    #[test]
    fn mvp_composition_order() {
        let mut transform = TransformState::default();
        let model = Mat4::from_translation(Vec3::X);
        let view = Mat4::from_rotation_y(0.3);
        let projection = Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
        transform.set_model(model);
        transform.set_view(view);
        transform.set_projection(projection);
        assert_eq!(transform.mvp(), projection * view * model);
        assert_eq!(transform.model_view(), view * model);
    }

    #[test]
    fn singular_model_keeps_finite_normal() {
        let mut transform = TransformState::default();
        transform.set_model(Mat4::from_scale(Vec3::ZERO));
        assert_eq!(transform.normal(), Mat4::IDENTITY);
    }
}
