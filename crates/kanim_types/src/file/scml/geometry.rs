//! Transform math for keyframe elements.

/// A resolved object transform at one mainline keyframe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
	/// Horizontal scale
	pub scale_x: f32,
	/// Vertical scale
	pub scale_y: f32,
	/// Rotation in degrees, counter-clockwise
	pub angle: f32,
	/// Horizontal offset in pixels
	pub x: f32,
	/// Vertical offset in pixels, y up
	pub y: f32,
}

impl Default for Transform {
	fn default() -> Self {
		Self {
			scale_x: 1.0,
			scale_y: 1.0,
			angle: 0.0,
			x: 0.0,
			y: 0.0,
		}
	}
}

impl Transform {
	/// Rotation in radians.
	pub fn radians(&self) -> f32 {
		self.angle.to_radians()
	}

	/// Kanim affine components `[m1, m2, m3, m4, m5, m6]`.
	///
	/// The linear part is scale composed with rotation; translation is stored doubled
	/// with y flipped to point down.
	pub fn matrix(&self) -> [f32; 6] {
		let (sin, cos) = self.radians().sin_cos();
		[
			self.scale_x * cos,
			-self.scale_x * sin,
			self.scale_y * sin,
			self.scale_y * cos,
			self.x * 2.0,
			-self.y * 2.0,
		]
	}

	/// The four corners of a `width`×`height` sprite placed at this transform's
	/// offset, scaled and rotated about its pivot.
	///
	/// `pivot_x`/`pivot_y` are fractions of the sprite size.
	pub fn corners(&self, width: f32, height: f32, pivot_x: f32, pivot_y: f32) -> [(f32, f32); 4] {
		let cx = pivot_x * width + self.x;
		let cy = pivot_y * height + self.y;
		let x2 = self.x + width;
		let y2 = self.y + height;
		[(self.x, self.y), (x2, self.y), (x2, y2), (self.x, y2)]
			.map(|p| rotate_around(p, (cx, cy), self.radians(), self.scale_x, self.scale_y))
	}
}

/// Scales `point` about `center`, then rotates it by `radians` about the same center.
pub fn rotate_around(point: (f32, f32), center: (f32, f32), radians: f32, sx: f32, sy: f32) -> (f32, f32) {
	let (sin, cos) = radians.sin_cos();
	let dx = (point.0 - center.0) * sx;
	let dy = (point.1 - center.1) * sy;
	(center.0 + dx * cos - dy * sin, center.1 + dx * sin + dy * cos)
}

/// Accumulates the extent of a set of points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
	min_x: f32,
	min_y: f32,
	max_x: f32,
	max_y: f32,
}

impl Default for BoundingBox {
	fn default() -> Self {
		Self {
			min_x: f32::MAX,
			min_y: f32::MAX,
			max_x: f32::MIN,
			max_y: f32::MIN,
		}
	}
}

impl BoundingBox {
	/// Grows the box to include `point`.
	pub fn add(&mut self, point: (f32, f32)) {
		self.min_x = self.min_x.min(point.0);
		self.min_y = self.min_y.min(point.1);
		self.max_x = self.max_x.max(point.0);
		self.max_y = self.max_y.max(point.1);
	}

	/// Returns `true` until a point has been added.
	pub fn is_empty(&self) -> bool {
		self.min_x > self.max_x
	}

	/// `(center_x, center_y, width, height)`; all zero for an empty box.
	pub fn center_and_size(&self) -> (f32, f32, f32, f32) {
		if self.is_empty() {
			return (0.0, 0.0, 0.0, 0.0);
		}
		(
			(self.min_x + self.max_x) / 2.0,
			(self.min_y + self.max_y) / 2.0,
			self.max_x - self.min_x,
			self.max_y - self.min_y,
		)
	}
}

/// A timeline key's value for one attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeyValue {
	/// Key time in milliseconds
	pub time: i32,
	/// Attribute value (already defaulted if the key omits it)
	pub value: f32,
}

/// Samples an attribute at `time` from the keys around it.
///
/// No previous key yields `default`; no next key holds the previous value; otherwise
/// the value is linearly interpolated between the two keys.
pub fn interpolate(prev: Option<KeyValue>, next: Option<KeyValue>, time: i32, default: f32) -> f32 {
	match (prev, next) {
		(None, _) => default,
		(Some(prev), None) => prev.value,
		(Some(prev), Some(next)) => {
			let span = next.time - prev.time;
			if span == 0 {
				return prev.value;
			}
			let t = (time - prev.time) as f32 / span as f32;
			prev.value + (next.value - prev.value) * t
		}
	}
}
