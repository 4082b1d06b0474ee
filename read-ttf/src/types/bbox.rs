/// Minimum and maximum extents of a rectangular region.
///
/// Fonts use a Y-up coordinate system, so `y_min` is the bottom of the
/// region and `y_max` the top. The min and max corners are the diagonal of
/// the box reported by a glyph header.
#[derive(Copy, Clone, PartialEq, Eq, Default, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bytemuck", derive(bytemuck::AnyBitPattern))]
#[repr(C)]
pub struct BoundingBox<T> {
    /// Minimum extent in the x direction: the left side of the region.
    pub x_min: T,
    /// Minimum extent in the y direction.
    pub y_min: T,
    /// Maximum extent in the x direction: the right side of the region.
    pub x_max: T,
    /// Maximum extent in the y direction.
    pub y_max: T,
}

/// SAFETY:
/// The struct is `#[repr(C)]` with four fields of the same `NoUninit`
/// type, so it carries no padding bytes. The derive macro cannot check
/// that for a type with generic parameters, hence the manual impl.
#[cfg(feature = "bytemuck")]
unsafe impl<T: bytemuck::NoUninit> bytemuck::NoUninit for BoundingBox<T> {}

impl<T> BoundingBox<T> {
    /// Creates a new bounding box from the two diagonal corners.
    pub const fn new(x_min: T, y_min: T, x_max: T, y_max: T) -> Self {
        Self {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }
}
