//! Record construction seam

use crate::detect::Arguments;

/// A record built from a constructor argument list
///
/// `construct` is the record's own constructor. The gate inspects `Args`
/// before handing them over, so the list type must say which of its
/// elements are pending.
///
/// ```
/// use guarded_core::Construct;
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Construct for Point {
///     type Args = (i32, i32);
///
///     fn construct((x, y): Self::Args) -> Self {
///         Self { x, y }
///     }
/// }
///
/// let p = Point::construct((1, 2));
/// assert_eq!(p.x + p.y, 3);
/// ```
pub trait Construct: Sized {
    /// Constructor argument list
    type Args: Arguments + Send;

    /// Build the record
    fn construct(args: Self::Args) -> Self;
}
