//! Per-image working context.

use mesh_layered::{LayeredMesh, PickRect};
use nalgebra::{Point2, Vector2};
use tf_field::{GradientField, GvfConfig, ScalarField};
use tracing::info;

use crate::error::GrowthResult;

/// Everything the growth controller needs to know about the current image.
///
/// Pointer positions arrive in image pixels. Geometry is built in model
/// coordinates, which are image coordinates minus [`Session::offset`]; by
/// default the model origin sits at the image centre.
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use ring_growth::Session;
///
/// let session = Session::new(640, 480);
/// assert_eq!(session.to_model(Point2::new(320, 240)), Point2::origin());
/// assert_eq!(session.to_image(Point2::new(-20, 10)), Point2::new(300, 250));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Session {
    width: usize,
    height: usize,
    offset: Vector2<i32>,
    gradient: Option<GradientField>,
    texture_id: u32,
    meshes: Vec<LayeredMesh>,
}

impl Session {
    /// Session for an image of the given size, without a gradient field.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        let half = |n: usize| i32::try_from(n / 2).unwrap_or(i32::MAX);
        Self {
            width,
            height,
            offset: Vector2::new(half(width), half(height)),
            ..Self::default()
        }
    }

    /// Session for `image` with its gradient field computed up front.
    ///
    /// # Errors
    ///
    /// Returns [`crate::GrowthError::Field`] if the gradient field cannot be built.
    pub fn from_image(image: &ScalarField, gvf: &GvfConfig) -> GrowthResult<Self> {
        let gradient = GradientField::compute(image, gvf)?;
        info!(
            width = image.width(),
            height = image.height(),
            "session gradient field ready"
        );
        Ok(Self::new(image.width(), image.height()).with_gradient(gradient))
    }

    /// Attach a precomputed gradient field.
    #[must_use]
    pub fn with_gradient(mut self, gradient: GradientField) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// Set the model-to-image offset.
    #[must_use]
    pub fn with_offset(mut self, offset: Vector2<i32>) -> Self {
        self.offset = offset;
        self
    }

    /// Set the texture handle given to new meshes.
    #[must_use]
    pub fn with_texture_id(mut self, id: u32) -> Self {
        self.texture_id = id;
        self
    }

    /// Image width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Image position of the model origin.
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> Vector2<i32> {
        self.offset
    }

    /// Cached gradient field.
    #[inline]
    #[must_use]
    pub const fn gradient(&self) -> Option<&GradientField> {
        self.gradient.as_ref()
    }

    /// Texture handle given to new meshes.
    #[inline]
    #[must_use]
    pub const fn texture_id(&self) -> u32 {
        self.texture_id
    }

    /// Committed meshes.
    #[inline]
    #[must_use]
    pub fn meshes(&self) -> &[LayeredMesh] {
        &self.meshes
    }

    /// Committed meshes, for editing by the caller.
    #[inline]
    pub fn meshes_mut(&mut self) -> &mut Vec<LayeredMesh> {
        &mut self.meshes
    }

    /// Store a committed mesh and return its index.
    pub fn push_mesh(&mut self, mesh: LayeredMesh) -> usize {
        self.meshes.push(mesh);
        self.meshes.len() - 1
    }

    /// Index of the topmost committed mesh whose overlay covers image
    /// position `pixel`.
    ///
    /// Later meshes are drawn over earlier ones, so the search runs from the
    /// last mesh back.
    #[must_use]
    pub fn mesh_at(&self, pixel: Point2<i32>) -> Option<usize> {
        let point = self.to_model(pixel).cast::<f64>();
        self.meshes.iter().rposition(|m| m.contains(point))
    }

    /// Indices of the committed meshes whose overlay touches the image
    /// rectangle spanned by pixels `a` and `b`.
    #[must_use]
    pub fn meshes_in(&self, a: Point2<i32>, b: Point2<i32>) -> Vec<usize> {
        let rect = PickRect::new(self.to_model(a).cast(), self.to_model(b).cast());
        self.meshes
            .iter()
            .enumerate()
            .filter(|(_, m)| m.falls_into(&rect))
            .map(|(i, _)| i)
            .collect()
    }

    /// Image pixel to model coordinates.
    #[inline]
    #[must_use]
    pub fn to_model(&self, pixel: Point2<i32>) -> Point2<i32> {
        pixel - self.offset
    }

    /// Model coordinates to image pixel.
    #[inline]
    #[must_use]
    pub fn to_image(&self, point: Point2<i32>) -> Point2<i32> {
        point + self.offset
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn origin_at_image_centre() {
        let session = Session::new(101, 50);
        assert_eq!(session.offset(), Vector2::new(50, 25));
        assert!(session.gradient().is_none());
        assert!(session.meshes().is_empty());
    }

    #[test]
    fn from_image_caches_gradient() {
        let image = ScalarField::from_fn(16, 12, |x, _| if x < 8 { 0.0 } else { 200.0 });
        let session = Session::from_image(&image, &GvfConfig::default().with_iterations(4))
            .unwrap()
            .with_texture_id(3);
        assert_eq!(session.gradient().unwrap().size(), (16, 12));
        assert_eq!((session.width(), session.height()), (16, 12));
        assert_eq!(session.texture_id(), 3);
    }

    #[test]
    fn coordinate_round_trip() {
        let session = Session::new(64, 64).with_offset(Vector2::new(10, -4));
        let p = Point2::new(7, 7);
        assert_eq!(session.to_image(session.to_model(p)), p);
        assert_eq!(session.to_model(p), Point2::new(-3, 11));
    }

    /// Mesh whose overlay covers model x in [-10, 10] and y in [y0, y0 + 8].
    fn picked_mesh(y0: i32) -> LayeredMesh {
        let mut mesh = LayeredMesh::new();
        mesh.set_overlay(vec![
            [Point2::new(-10, y0), Point2::new(10, y0), Point2::new(0, y0 + 2)],
            [Point2::new(-10, y0 + 8), Point2::new(10, y0 + 8), Point2::new(0, y0 + 10)],
        ]);
        mesh
    }

    #[test]
    fn picking_takes_image_pixels() {
        let mut session = Session::new(64, 64);
        session.push_mesh(picked_mesh(0));
        session.push_mesh(picked_mesh(4));

        // Model (0, 2) is only under the first mesh
        assert_eq!(session.mesh_at(Point2::new(32, 34)), Some(0));
        // Model (0, 6) is under both; the later one wins
        assert_eq!(session.mesh_at(Point2::new(32, 38)), Some(1));
        // The same pixels taken as model coordinates miss everything
        assert_eq!(session.mesh_at(Point2::new(0, 2)), None);

        assert_eq!(session.meshes_in(Point2::new(20, 30), Point2::new(44, 35)), vec![0]);
        assert_eq!(session.meshes_in(Point2::new(20, 30), Point2::new(44, 50)), vec![0, 1]);
        assert!(session.meshes_in(Point2::new(0, 0), Point2::new(5, 5)).is_empty());
    }

    #[test]
    fn push_returns_index() {
        let mut session = Session::new(8, 8);
        assert_eq!(session.push_mesh(LayeredMesh::new()), 0);
        assert_eq!(session.push_mesh(LayeredMesh::new()), 1);
        session.meshes_mut().remove(0);
        assert_eq!(session.meshes().len(), 1);
    }
}
