//! Interactive ring growth.
//!
//! The controller turns pointer events into a tube:
//!
//! ```text
//! Idle --press--> Basis{1} --press--> Basis{2} --press--> Growing --press--> Idle
//!                                                            |
//!                                                    pointer_moved rebuilds
//! ```
//!
//! The third press seeds the mesh with the snapped basis ring. While growing,
//! every pointer move that ends at least one step from the last key line
//! rebuilds the tube from its first ring towards the pointer. The next press
//! commits the mesh into the [`Session`].

use mesh_layered::{LayeredMesh, unite};
use nalgebra::{Point2, Vector2};
use section_types::{Basis, EllipseSection, SectionError, depth_ring, inclination_angle};
use tf_snap::{MoveConfig, SnapError};
use tracing::{debug, info, warn};

use crate::batch::{cap, push_ring};
use crate::config::GrowthConfig;
use crate::error::{GrowthError, GrowthResult};
use crate::session::Session;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest key diameter, in pixels, that still makes a ring.
const MIN_DIAMETER: f64 = 1.0;

/// Pointer button of a press or release event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PointerButton {
    /// Primary button; drives the controller.
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
}

/// Where the controller is in a creation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum GrowthPhase {
    /// No creation in progress.
    #[default]
    Idle,
    /// Collecting basis points.
    Basis {
        /// Points captured so far, 1 or 2.
        captured: usize,
    },
    /// Mesh seeded; pointer moves grow it.
    Growing,
}

/// Guide geometry for the renderer, in model coordinates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Overlay {
    /// Line from the first basis point to the pointer or the second point.
    pub guide: Option<[Point2<i32>; 2]>,
    /// Outline of the basis section, once two points are known.
    pub preview: Vec<Point2<i32>>,
    /// Outline of the first key section.
    pub first_ring: Vec<Point2<i32>>,
    /// Outline of the last key section.
    pub last_ring: Vec<Point2<i32>>,
}

/// State machine growing one tube at a time.
///
/// # Example
///
/// ```
/// use nalgebra::Point2;
/// use ring_growth::{GrowthConfig, GrowthController, GrowthPhase, PointerButton, Session};
///
/// let mut session = Session::new(64, 64);
/// let mut controller = GrowthController::new(GrowthConfig::default()).unwrap();
///
/// controller
///     .pointer_pressed(&mut session, PointerButton::Left, Point2::new(20, 10))
///     .unwrap();
/// controller.pointer_moved(&session, Point2::new(44, 10)).unwrap();
/// assert_eq!(controller.phase(), GrowthPhase::Basis { captured: 1 });
///
/// let guide = controller.overlay().guide.unwrap();
/// assert_eq!(guide[1], session.to_model(Point2::new(44, 10)));
///
/// controller.interrupt();
/// assert_eq!(controller.phase(), GrowthPhase::Idle);
/// ```
#[derive(Debug, Clone)]
pub struct GrowthController {
    config: GrowthConfig,
    phase: GrowthPhase,
    pointer: Point2<i32>,
    clicks: Vec<Point2<i32>>,
    key_rings: Vec<Basis>,
    mesh: LayeredMesh,
    inclination: f64,
    twist: f64,
    step: i32,
    first_outline: Vec<Point2<i32>>,
    last_outline: Vec<Point2<i32>>,
}

impl GrowthController {
    /// Create an idle controller.
    ///
    /// # Errors
    ///
    /// Returns the error of [`GrowthConfig::validate`].
    pub fn new(config: GrowthConfig) -> GrowthResult<Self> {
        config.validate()?;
        let step = config.step;
        Ok(Self {
            config,
            phase: GrowthPhase::Idle,
            pointer: Point2::origin(),
            clicks: Vec::with_capacity(3),
            key_rings: Vec::new(),
            mesh: LayeredMesh::new(),
            inclination: 0.0,
            twist: 0.0,
            step,
            first_outline: Vec::new(),
            last_outline: Vec::new(),
        })
    }

    /// Current settings.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &GrowthConfig {
        &self.config
    }

    /// Current phase.
    #[inline]
    #[must_use]
    pub const fn phase(&self) -> GrowthPhase {
        self.phase
    }

    /// Whether no creation is in progress.
    #[inline]
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.phase == GrowthPhase::Idle
    }

    /// Mesh under construction.
    #[must_use]
    pub fn mesh(&self) -> Option<&LayeredMesh> {
        (self.phase == GrowthPhase::Growing).then_some(&self.mesh)
    }

    /// Key sections of the current mesh, first to last.
    #[inline]
    #[must_use]
    pub fn key_rings(&self) -> &[Basis] {
        &self.key_rings
    }

    /// Inclination of the basis diameter.
    #[inline]
    #[must_use]
    pub const fn inclination(&self) -> f64 {
        self.inclination
    }

    /// Twist recovered from the basis.
    #[inline]
    #[must_use]
    pub const fn twist(&self) -> f64 {
        self.twist
    }

    /// Signed ring spacing; negative while growing against the key normal.
    #[inline]
    #[must_use]
    pub const fn step(&self) -> i32 {
        self.step
    }

    /// Handle a button press at image position `pixel`.
    ///
    /// Returns the session index of the committed mesh when the press ends a
    /// creation. Presses of buttons other than [`PointerButton::Left`] are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Seeding on the third press fails with
    /// - [`GrowthError::MissingGradient`] without a gradient field
    /// - [`GrowthError::Section`] for a collapsed basis
    /// - [`GrowthError::Snap`] if the basis lies outside the image
    ///
    /// The controller is back in [`GrowthPhase::Idle`] after any error.
    pub fn pointer_pressed(
        &mut self,
        session: &mut Session,
        button: PointerButton,
        pixel: Point2<i32>,
    ) -> GrowthResult<Option<usize>> {
        if button != PointerButton::Left {
            return Ok(None);
        }
        self.pointer = session.to_model(pixel);

        match self.phase {
            GrowthPhase::Idle => {
                self.clicks.clear();
                self.clicks.push(self.pointer);
                self.phase = GrowthPhase::Basis { captured: 1 };
                Ok(None)
            }
            GrowthPhase::Basis { captured: 1 } => {
                self.clicks.push(self.pointer);
                self.inclination = inclination_angle(self.clicks[0], self.pointer);
                self.phase = GrowthPhase::Basis { captured: 2 };
                Ok(None)
            }
            GrowthPhase::Basis { .. } => {
                self.clicks.push(self.pointer);
                if let Err(err) = self.seed(session) {
                    warn!(%err, "seeding failed");
                    self.reset();
                    return Err(err);
                }
                self.phase = GrowthPhase::Growing;
                Ok(None)
            }
            GrowthPhase::Growing => {
                let result = self.commit(session);
                self.reset();
                result.map(Some)
            }
        }
    }

    /// Handle pointer motion to image position `pixel`.
    ///
    /// While growing, rebuilds the mesh once the pointer is at least one step
    /// from the last key line.
    ///
    /// # Errors
    ///
    /// Returns [`GrowthError::MissingGradient`] if the session lost its field.
    pub fn pointer_moved(&mut self, session: &Session, pixel: Point2<i32>) -> GrowthResult<()> {
        self.pointer = session.to_model(pixel);
        if self.phase != GrowthPhase::Growing {
            return Ok(());
        }
        let Some(last) = self.key_rings.last() else {
            return Ok(());
        };
        if self.reaches(last) {
            self.grow(session)?;
        }
        Ok(())
    }

    /// Handle a button release at image position `pixel`.
    ///
    /// Releases do not change the phase.
    pub fn pointer_released(&mut self, session: &Session, _button: PointerButton, pixel: Point2<i32>) {
        self.pointer = session.to_model(pixel);
    }

    /// Abandon the current creation, discarding its mesh.
    pub fn interrupt(&mut self) {
        if self.phase != GrowthPhase::Idle {
            debug!(phase = ?self.phase, rings = self.mesh.ring_count(), "creation interrupted");
            self.reset();
        }
    }

    /// Guide geometry for the current phase.
    #[must_use]
    pub fn overlay(&self) -> Overlay {
        let mut overlay = Overlay {
            first_ring: self.first_outline.clone(),
            last_ring: self.last_outline.clone(),
            ..Overlay::default()
        };
        let Some(&start) = self.clicks.first() else {
            return overlay;
        };
        let second = self.clicks.get(1).copied();
        overlay.guide = Some([start, second.unwrap_or(self.pointer)]);
        if let Some(end) = second {
            let third = self.clicks.get(2).copied().unwrap_or(self.pointer);
            overlay.preview = self
                .outline(&Basis::new(start, end, third))
                .unwrap_or_default();
        }
        overlay
    }

    /// Snap the basis, start the mesh and record the first outline.
    fn seed(&mut self, session: &Session) -> GrowthResult<()> {
        let gradient = session.gradient().ok_or(GrowthError::MissingGradient)?;
        let basis = Basis::from_slice(&self.clicks)?;
        if basis.is_degenerate() {
            return Err(SectionError::degenerate("basis diameter ends coincide").into());
        }
        self.twist = basis.twist();

        let mut key = basis;
        let config = MoveConfig::along(slide_direction(&key))
            .with_offset(session.offset())
            .with_look_ahead(true);
        self.config
            .mover
            .move_points(gradient.magnitude(), key.points_mut(), &config)?;
        if key.diameter() < MIN_DIAMETER {
            return Err(SectionError::degenerate("basis collapsed while snapping").into());
        }

        self.mesh = LayeredMesh::new();
        self.mesh.set_texture_id(session.texture_id());
        let ring = depth_ring(&key, self.inclination, self.config.slices)?;
        push_ring(&mut self.mesh, &ring, &key, self.twist, session, &self.config)?;
        self.key_rings = vec![key];

        self.first_outline = self.outline(&key)?;
        self.last_outline = self.first_outline.clone();
        info!(
            inclination = self.inclination,
            twist = self.twist,
            diameter = key.diameter(),
            "mesh seeded"
        );
        Ok(())
    }

    /// Rebuild the tube from its first key section towards the pointer.
    fn grow(&mut self, session: &Session) -> GrowthResult<()> {
        let gradient = session.gradient().ok_or(GrowthError::MissingGradient)?;
        let Some(first) = self.key_rings.first().copied() else {
            return Ok(());
        };
        let twist_offset = self.twist_offset();

        self.key_rings.truncate(1);
        self.mesh.clear();
        let ring = depth_ring(&first, self.inclination, self.config.slices)?;
        push_ring(&mut self.mesh, &ring, &first, self.twist, session, &self.config)?;

        let mut last = first;
        while self.reaches(&last) {
            if self.mesh.ring_count() >= self.config.max_rings {
                debug!(limit = self.config.max_rings, "ring limit reached");
                break;
            }
            self.correct_step(&last);

            let mut next = last;
            let config = MoveConfig::along(slide_direction(&last))
                .with_growth(unit_normal(&last), f64::from(self.step))
                .with_offset(session.offset())
                .with_look_ahead(true);
            match self
                .config
                .mover
                .move_points(gradient.magnitude(), next.points_mut(), &config)
            {
                Ok(()) => {}
                Err(SnapError::SeedOutOfBounds { x, y }) => {
                    debug!(x, y, "growth left the image");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
            if next.diameter() < MIN_DIAMETER {
                debug!(ring = self.key_rings.len(), "ring collapsed");
                break;
            }
            next.points_mut()[2] = next.p0() + twist_offset;

            let ring = depth_ring(&next, self.inclination, self.config.slices)?;
            let before = self.mesh.bounds();
            let mut after = before;
            for p in &ring {
                after.expand_to_include(p);
            }
            if after == before {
                debug!(ring = self.key_rings.len(), "ring adds nothing to the bounds");
                break;
            }

            push_ring(&mut self.mesh, &ring, &next, self.twist, session, &self.config)?;
            self.key_rings.push(next);
            last = next;
        }

        self.last_outline = self.outline(&last)?;
        self.mesh.update_normals();
        debug!(rings = self.mesh.ring_count(), step = self.step, "growth rebuilt");
        Ok(())
    }

    /// Finish the mesh, weld it if asked and hand it to the session.
    fn commit(&mut self, session: &mut Session) -> GrowthResult<usize> {
        let mut mesh = std::mem::take(&mut self.mesh);
        mesh.set_overlay(self.key_rings.iter().map(|k| *k.points()).collect());
        cap(&mut mesh, &self.config)?;
        mesh.update_normals();
        if self.config.weld {
            mesh = self.weld(session, mesh)?;
        }

        let rings = mesh.ring_count();
        let vertices = mesh.vertex_count();
        let index = session.push_mesh(mesh);
        info!(index, rings, vertices, "mesh committed");
        Ok(index)
    }

    /// Unite `mesh` with session meshes closer than the weld distance, nearest
    /// first, until none is left in reach.
    fn weld(&self, session: &mut Session, mut mesh: LayeredMesh) -> GrowthResult<LayeredMesh> {
        loop {
            let target = session
                .meshes()
                .iter()
                .enumerate()
                .map(|(i, m)| (i, m.distance(&mesh)))
                .filter(|(_, d)| *d < self.config.weld_distance)
                .min_by(|a, b| a.1.total_cmp(&b.1));
            let Some((index, distance)) = target else {
                return Ok(mesh);
            };

            let other = session.meshes_mut().remove(index);
            match unite(&other, &mesh) {
                Ok(mut united) => {
                    cap(&mut united, &self.config)?;
                    united.update_normals();
                    info!(index, distance, rings = united.ring_count(), "meshes welded");
                    mesh = united;
                }
                Err(err) => {
                    warn!(%err, index, "weld failed, keeping meshes apart");
                    session.meshes_mut().insert(index, other);
                    return Ok(mesh);
                }
            }
        }
    }

    /// Whether the pointer is at least one step from the key line of `key`.
    fn reaches(&self, key: &Basis) -> bool {
        key.axis().distance_to_pixel(self.pointer) >= f64::from(self.step.unsigned_abs())
    }

    /// Point the step towards the pointer side of the key line.
    fn correct_step(&mut self, key: &Basis) {
        let growth = unit_normal(key) * f64::from(self.step);
        let towards: Vector2<f64> = (self.pointer - key.p0()).cast();
        if growth.dot(&towards) < 0.0 {
            self.step = self.step.saturating_neg();
            debug!(step = self.step, "step reversed");
        }
    }

    fn twist_offset(&self) -> Vector2<i32> {
        match (self.clicks.first(), self.clicks.get(2)) {
            (Some(p0), Some(p2)) => p2 - p0,
            _ => Vector2::zeros(),
        }
    }

    fn outline(&self, key: &Basis) -> GrowthResult<Vec<Point2<i32>>> {
        let section = EllipseSection::new(
            key.center(),
            key.semi_major(),
            key.semi_minor(),
            self.inclination,
        );
        Ok(section.pixels(self.config.slices)?)
    }

    fn reset(&mut self) {
        self.phase = GrowthPhase::Idle;
        self.clicks.clear();
        self.key_rings.clear();
        self.mesh = LayeredMesh::new();
        self.inclination = 0.0;
        self.twist = 0.0;
        self.step = self.config.step;
        self.first_outline.clear();
        self.last_outline.clear();
    }
}

fn unit_normal(key: &Basis) -> Vector2<f64> {
    key.axis()
        .normal()
        .try_normalize(f64::EPSILON)
        .unwrap_or_else(Vector2::zeros)
}

fn slide_direction(key: &Basis) -> Vector2<f64> {
    let d: Vector2<f64> = (key.p0() - key.p1()).cast();
    d.try_normalize(f64::EPSILON).unwrap_or_else(Vector2::x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_4;
    use tf_field::{GvfConfig, ScalarField};

    /// 64x64 image with a bright vertical bar over columns 22..=42.
    fn bar_session() -> Session {
        let image =
            ScalarField::from_fn(64, 64, |x, _| if (22..=42).contains(&x) { 255.0 } else { 0.0 });
        Session::from_image(&image, &GvfConfig::default().with_iterations(32)).unwrap()
    }

    fn press(c: &mut GrowthController, s: &mut Session, x: i32, y: i32) -> GrowthResult<Option<usize>> {
        c.pointer_pressed(s, PointerButton::Left, Point2::new(x, y))
    }

    /// Seed across the bar at row `y` and drag to row `to`.
    fn grown(config: GrowthConfig, session: &mut Session, y: i32, to: i32) -> GrowthController {
        let mut c = GrowthController::new(config).unwrap();
        press(&mut c, session, 22, y).unwrap();
        press(&mut c, session, 42, y).unwrap();
        press(&mut c, session, 32, y + 3).unwrap();
        c.pointer_moved(session, Point2::new(32, to)).unwrap();
        c
    }

    #[test]
    fn basis_capture_phases() {
        let mut session = bar_session();
        let mut c = GrowthController::new(GrowthConfig::default()).unwrap();
        assert!(c.is_idle());

        press(&mut c, &mut session, 32, 32).unwrap();
        assert_eq!(c.phase(), GrowthPhase::Basis { captured: 1 });
        press(&mut c, &mut session, 42, 42).unwrap();
        assert_eq!(c.phase(), GrowthPhase::Basis { captured: 2 });
        assert_relative_eq!(c.inclination(), FRAC_PI_4, epsilon = 1e-12);
        assert!(c.mesh().is_none());
        assert!(!c.overlay().preview.is_empty());
    }

    #[test]
    fn other_buttons_are_ignored() {
        let mut session = bar_session();
        let mut c = GrowthController::new(GrowthConfig::default()).unwrap();
        let out = c
            .pointer_pressed(&mut session, PointerButton::Right, Point2::new(5, 5))
            .unwrap();
        assert_eq!(out, None);
        assert!(c.is_idle());
    }

    #[test]
    fn third_press_seeds_first_ring() {
        let mut session = bar_session();
        let c = grown(GrowthConfig::default(), &mut session, 10, 10);
        assert_eq!(c.phase(), GrowthPhase::Growing);

        let mesh = c.mesh().unwrap();
        assert_eq!(mesh.ring_count(), 1);
        assert_eq!(mesh.vertex_count(), 16);
        assert_eq!(c.key_rings().len(), 1);
        assert!(c.twist() > 0.0);

        let overlay = c.overlay();
        assert_eq!(overlay.first_ring.len(), 16);
        assert_eq!(overlay.first_ring, overlay.last_ring);
    }

    #[test]
    fn dragging_grows_towards_pointer() {
        let mut session = bar_session();
        let c = grown(GrowthConfig::default(), &mut session, 10, 30);

        let mesh = c.mesh().unwrap();
        assert!(mesh.ring_count() > 2);
        assert_eq!(mesh.ring_count(), c.key_rings().len());
        assert!(c.step() > 0);
        for pair in c.key_rings().windows(2) {
            assert!(pair[1].p0().y > pair[0].p0().y);
        }
        // The last key line ends within a step of the pointer
        let last = c.key_rings().last().unwrap();
        let pointer = session.to_model(Point2::new(32, 30));
        assert!(last.axis().distance_to_pixel(pointer) < 4.0);
    }

    #[test]
    fn step_reverses_for_upward_drag() {
        let mut session = bar_session();
        let c = grown(GrowthConfig::default(), &mut session, 40, 20);
        assert!(c.mesh().unwrap().ring_count() > 1);
        for pair in c.key_rings().windows(2) {
            assert!(pair[1].p0().y < pair[0].p0().y);
        }
        // Sign depends on the key normal, but growth must follow the pointer
        let last = c.key_rings().last().unwrap();
        assert!(last.p0().y < c.key_rings()[0].p0().y);
    }

    #[test]
    fn ring_limit_stops_growth() {
        let mut session = bar_session();
        let c = grown(GrowthConfig::default().with_max_rings(3), &mut session, 5, 60);
        assert_eq!(c.mesh().unwrap().ring_count(), 3);
    }

    #[test]
    fn growth_stops_at_image_border() {
        let mut session = bar_session();
        let c = grown(GrowthConfig::default().with_step(8), &mut session, 40, 200);
        let mesh = c.mesh().unwrap();
        assert!(mesh.ring_count() > 1);
        for key in c.key_rings() {
            assert!(session.to_image(key.p0()).y < 64);
        }
    }

    #[test]
    fn commit_stores_mesh_and_resets() {
        let mut session = bar_session();
        let config = GrowthConfig::default()
            .with_caps(true, true)
            .with_texturing(crate::TexturingMode::Mirror);
        let mut c = grown(config, &mut session, 10, 30);
        let rings = c.mesh().unwrap().ring_count();

        let index = press(&mut c, &mut session, 0, 0).unwrap();
        assert_eq!(index, Some(0));
        assert!(c.is_idle());
        assert!(c.key_rings().is_empty());
        assert_eq!(c.overlay(), Overlay::default());

        let mesh = &session.meshes()[0];
        assert_eq!(mesh.ring_count(), rings);
        assert_eq!(mesh.overlay().len(), rings);
        assert!(mesh.top_cover().is_some());
        assert!(mesh.bottom_cover().is_some());
        assert!(mesh.has_full_tex_coords());
    }

    #[test]
    fn commit_welds_nearby_mesh() {
        let mut session = bar_session();
        let config = GrowthConfig::default().with_weld(32.0);

        let mut c = grown(config.clone(), &mut session, 6, 26);
        let first = c.mesh().unwrap().ring_count();
        press(&mut c, &mut session, 0, 0).unwrap();

        let mut c = grown(config, &mut session, 32, 52);
        let second = c.mesh().unwrap().ring_count();
        let index = press(&mut c, &mut session, 0, 0).unwrap();

        assert_eq!(index, Some(0));
        assert_eq!(session.meshes().len(), 1);
        assert_eq!(session.meshes()[0].ring_count(), first + second);
        assert_eq!(session.meshes()[0].overlay().len(), first + second);
    }

    #[test]
    fn extreme_steps() {
        let config = GrowthConfig::default().with_step(i32::MIN);
        assert_eq!(GrowthController::new(config).unwrap_err(), GrowthError::InvalidStep(i32::MIN));

        // The most negative usable step never reaches the pointer
        let mut session = bar_session();
        let c = grown(GrowthConfig::default().with_step(i32::MIN + 1), &mut session, 10, 60);
        assert_eq!(c.mesh().unwrap().ring_count(), 1);
        assert_eq!(c.step(), i32::MIN + 1);
    }

    #[test]
    fn interrupt_discards_mesh() {
        let mut session = bar_session();
        let mut c = grown(GrowthConfig::default(), &mut session, 10, 30);
        c.interrupt();
        assert!(c.is_idle());
        assert!(c.mesh().is_none());
        assert!(session.meshes().is_empty());
        assert_eq!(c.step(), 4);
    }

    #[test]
    fn seeding_without_gradient_fails() {
        let mut session = Session::new(64, 64);
        let mut c = GrowthController::new(GrowthConfig::default()).unwrap();
        press(&mut c, &mut session, 22, 10).unwrap();
        press(&mut c, &mut session, 42, 10).unwrap();
        let err = press(&mut c, &mut session, 32, 13).unwrap_err();
        assert_eq!(err, GrowthError::MissingGradient);
        assert!(c.is_idle());
    }

    #[test]
    fn collapsed_basis_fails() {
        let mut session = bar_session();
        let mut c = GrowthController::new(GrowthConfig::default()).unwrap();
        press(&mut c, &mut session, 30, 10).unwrap();
        press(&mut c, &mut session, 30, 10).unwrap();
        let err = press(&mut c, &mut session, 32, 13).unwrap_err();
        assert!(err.is_degenerate());
        assert!(c.is_idle());
    }

    #[test]
    fn seed_outside_image_fails() {
        let mut session = bar_session();
        let mut c = GrowthController::new(GrowthConfig::default()).unwrap();
        press(&mut c, &mut session, -20, 10).unwrap();
        press(&mut c, &mut session, 10, 10).unwrap();
        let err = press(&mut c, &mut session, 0, 12).unwrap_err();
        assert!(matches!(err, GrowthError::Snap(SnapError::SeedOutOfBounds { .. })));
        assert!(c.is_idle());
    }
}
