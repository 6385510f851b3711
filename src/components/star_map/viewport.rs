//! Pan, zoom, inertia and reset for the star map viewport.
//!
//! The field is `map_scale` times the viewport in each axis and is centered in
//! the viewport, then translated by `offset` and scaled by `scale` about its
//! center. Every mutation re-clamps `offset` so the scaled field always covers
//! the viewport, including mid-drag and mid-animation.
//!
//! Animations (momentum coasting and the reset tween) are resumable state
//! advanced by [`ViewportController::tick`]. At most one is active; starting a
//! new one, or pressing the pointer, replaces whatever was running and bumps
//! the [`AnimationToken`].

use super::config::ViewportConfig;
use super::constellation::SurfaceSize;
use super::curve::Point;

/// Live pan/zoom transform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportTransform {
	/// Zoom factor, within `[min_scale, max_scale]`.
	pub scale: f64,
	/// Translation in screen pixels.
	pub offset: Point,
	/// Last pan delta, in pixels per frame. Drives momentum.
	pub velocity: Point,
}

/// Identifies one animation run. A stale token means the run was cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnimationToken(u64);

#[derive(Clone, Copy, Debug, PartialEq)]
struct ResetTween {
	start_scale: f64,
	start_offset: Point,
	step: u32,
	elapsed_ms: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum Animation {
	Idle,
	Momentum,
	Reset(ResetTween),
}

#[derive(Clone, Copy, Debug)]
struct Drag {
	origin: Point,
	last: Point,
}

/// Owns the viewport transform and every writer to it.
#[derive(Clone, Debug)]
pub struct ViewportController {
	config: ViewportConfig,
	width: f64,
	height: f64,
	min_scale: f64,
	transform: ViewportTransform,
	drag: Option<Drag>,
	/// The current or most recent press travelled past the drag threshold.
	drag_moved: bool,
	/// The view differs from its default; cleared by a completed reset.
	has_moved: bool,
	animation: Animation,
	epoch: u64,
}

impl ViewportController {
	/// Start at the reset view for a `width` x `height` viewport.
	pub fn new(config: ViewportConfig, width: f64, height: f64) -> Self {
		let min_scale = min_scale_for(&config);
		Self {
			config,
			width,
			height,
			min_scale,
			transform: ViewportTransform {
				scale: min_scale,
				offset: Point::default(),
				velocity: Point::default(),
			},
			drag: None,
			drag_moved: false,
			has_moved: false,
			animation: Animation::Idle,
			epoch: 0,
		}
	}

	/// Snapshot of scale, offset and velocity.
	pub fn transform(&self) -> ViewportTransform {
		self.transform
	}

	/// Current zoom factor.
	pub fn scale(&self) -> f64 {
		self.transform.scale
	}

	/// Current pan offset in screen pixels.
	pub fn offset(&self) -> Point {
		self.transform.offset
	}

	/// Smallest zoom, at which the field just covers the viewport.
	pub fn min_scale(&self) -> f64 {
		self.min_scale
	}

	/// Viewport size in CSS pixels.
	pub fn viewport_size(&self) -> SurfaceSize {
		SurfaceSize::new(self.width, self.height)
	}

	/// Unscaled pixel size of the field.
	pub fn field_size(&self) -> SurfaceSize {
		SurfaceSize::new(
			self.width * self.config.map_scale,
			self.height * self.config.map_scale,
		)
	}

	/// A press is in progress.
	pub fn is_dragging(&self) -> bool {
		self.drag.is_some()
	}

	/// Whether the current or last press moved far enough to count as a drag.
	pub fn drag_exceeded_threshold(&self) -> bool {
		self.drag_moved
	}

	/// Whether the view differs from the reset view.
	pub fn has_moved(&self) -> bool {
		self.has_moved
	}

	/// Momentum or a reset is running.
	pub fn is_animating(&self) -> bool {
		self.animation != Animation::Idle
	}

	/// A reset is running.
	pub fn is_resetting(&self) -> bool {
		matches!(self.animation, Animation::Reset(_))
	}

	/// Token of the current animation run.
	pub fn animation_token(&self) -> AnimationToken {
		AnimationToken(self.epoch)
	}

	/// Whether `token` still names the active animation.
	pub fn is_current(&self, token: AnimationToken) -> bool {
		self.is_animating() && token.0 == self.epoch
	}

	/// Half the overflow of the scaled field beyond the viewport, per axis.
	pub fn bounds(&self, scale: f64) -> Point {
		let field = self.field_size();
		Point::new(
			((field.width * scale - self.width) / 2.0).max(0.0),
			((field.height * scale - self.height) / 2.0).max(0.0),
		)
	}

	/// Restrict `offset` to the pannable range at `scale`.
	pub fn clamp_offset(&self, offset: Point, scale: f64) -> Point {
		let half = self.bounds(scale);
		Point::new(
			offset.x.clamp(-half.x, half.x),
			offset.y.clamp(-half.y, half.y),
		)
	}

	fn clamp_scale(&self, scale: f64) -> f64 {
		scale.clamp(self.min_scale, self.config.max_scale.max(self.min_scale))
	}

	/// Map a field-local pixel position to screen pixels.
	pub fn field_to_screen(&self, p: Point) -> Point {
		let field = self.field_size();
		let t = &self.transform;
		Point::new(
			self.width / 2.0 + t.offset.x + t.scale * (p.x - field.width / 2.0),
			self.height / 2.0 + t.offset.y + t.scale * (p.y - field.height / 2.0),
		)
	}

	/// Map a screen pixel position to field-local pixels.
	pub fn screen_to_field(&self, p: Point) -> Point {
		let field = self.field_size();
		let t = &self.transform;
		Point::new(
			(p.x - self.width / 2.0 - t.offset.x) / t.scale + field.width / 2.0,
			(p.y - self.height / 2.0 - t.offset.y) / t.scale + field.height / 2.0,
		)
	}

	/// Adopt a new viewport size. Safe to call repeatedly with the same size.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.min_scale = min_scale_for(&self.config);
		self.transform.scale = self.clamp_scale(self.transform.scale);
		self.transform.offset = self.clamp_offset(self.transform.offset, self.transform.scale);
	}

	/// Begin a press. Cancels any running animation.
	pub fn pointer_down(&mut self, at: Point) {
		self.cancel_animation();
		self.drag = Some(Drag {
			origin: at,
			last: at,
		});
		self.drag_moved = false;
		self.transform.velocity = Point::default();
	}

	/// Pan by the pointer delta while pressed. Returns whether a drag is active.
	pub fn pointer_move(&mut self, at: Point) -> bool {
		let Some(drag) = self.drag.as_mut() else {
			return false;
		};
		let delta = Point::new(at.x - drag.last.x, at.y - drag.last.y);
		drag.last = at;
		let threshold = self.config.drag_threshold;
		if (at.x - drag.origin.x).abs() > threshold || (at.y - drag.origin.y).abs() > threshold {
			self.drag_moved = true;
			self.has_moved = true;
		}

		let offset = self.transform.offset;
		let moved = Point::new(offset.x + delta.x, offset.y + delta.y);
		self.transform.offset = self.clamp_offset(moved, self.transform.scale);
		self.transform.velocity = delta;
		true
	}

	/// End a press and start coasting with the last pan velocity.
	pub fn pointer_up(&mut self) {
		if self.drag.take().is_some() {
			self.start(Animation::Momentum);
		}
	}

	/// Step the zoom in the wheel direction.
	///
	/// Ignored when `browser_zoom` is set (the modifier that zooms the page) or
	/// when there is no vertical delta. Returns whether the event was consumed.
	pub fn wheel(&mut self, delta_y: f64, browser_zoom: bool) -> bool {
		if browser_zoom || delta_y == 0.0 {
			return false;
		}
		if self.is_resetting() {
			self.cancel_animation();
		}
		let step = if delta_y < 0.0 {
			self.config.zoom_step
		} else {
			-self.config.zoom_step
		};
		let scale = self.clamp_scale(self.transform.scale + step);
		self.transform.scale = scale;
		self.transform.offset = self.clamp_offset(self.transform.offset, scale);
		self.has_moved = true;
		true
	}

	/// Tween back to minimum zoom and zero offset.
	pub fn reset(&mut self) -> AnimationToken {
		self.drag = None;
		self.start(Animation::Reset(ResetTween {
			start_scale: self.transform.scale,
			start_offset: self.transform.offset,
			step: 0,
			elapsed_ms: 0.0,
		}))
	}

	/// Stop whatever animation is running.
	pub fn cancel_animation(&mut self) {
		if self.is_animating() {
			self.animation = Animation::Idle;
			self.epoch += 1;
		}
	}

	fn start(&mut self, animation: Animation) -> AnimationToken {
		self.epoch += 1;
		self.animation = animation;
		AnimationToken(self.epoch)
	}

	/// Advance the active animation by one frame of `dt_ms` milliseconds.
	///
	/// Returns whether the transform changed.
	pub fn tick(&mut self, dt_ms: f64) -> bool {
		match self.animation {
			Animation::Idle => false,
			Animation::Momentum => self.tick_momentum(),
			Animation::Reset(tween) => self.tick_reset(tween, dt_ms),
		}
	}

	fn tick_momentum(&mut self) -> bool {
		let friction = self.config.friction;
		let rest = self.config.rest_velocity;
		let v = Point::new(
			self.transform.velocity.x * friction,
			self.transform.velocity.y * friction,
		);
		self.transform.velocity = v;

		if v.x.abs() > rest || v.y.abs() > rest {
			let t = self.transform;
			self.transform.offset =
				self.clamp_offset(Point::new(t.offset.x + v.x, t.offset.y + v.y), t.scale);
			true
		} else {
			self.animation = Animation::Idle;
			false
		}
	}

	fn tick_reset(&mut self, mut tween: ResetTween, dt_ms: f64) -> bool {
		let steps = self.config.reset_steps.max(1);
		tween.elapsed_ms += dt_ms.max(0.0);
		let due = if self.config.reset_step_ms > 0.0 {
			((tween.elapsed_ms / self.config.reset_step_ms).floor() as u32).min(steps)
		} else {
			steps
		};
		if due <= tween.step {
			self.animation = Animation::Reset(tween);
			return false;
		}
		tween.step = due;

		let t = f64::from(due) / f64::from(steps);
		let scale = tween.start_scale + (self.min_scale - tween.start_scale) * t;
		self.transform.scale = self.clamp_scale(scale);
		let offset = Point::new(
			tween.start_offset.x * (1.0 - t),
			tween.start_offset.y * (1.0 - t),
		);
		self.transform.offset = self.clamp_offset(offset, self.transform.scale);

		if due == steps {
			self.transform.scale = self.min_scale;
			self.transform.offset = Point::default();
			self.transform.velocity = Point::default();
			self.has_moved = false;
			self.animation = Animation::Idle;
		} else {
			self.animation = Animation::Reset(tween);
		}
		true
	}
}

/// Smallest scale at which the field still covers the viewport.
fn min_scale_for(config: &ViewportConfig) -> f64 {
	// field = map_scale * viewport in both axes, so the axis ratios coincide
	1.0 / config.map_scale.max(f64::EPSILON)
}
