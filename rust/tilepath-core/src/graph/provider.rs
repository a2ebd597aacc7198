/// Read-only collision flag lookup keyed by absolute tile coordinates.
///
/// Implementations must answer every coordinate, returning their documented
/// default for regions with no stored data, and must be safe to share between
/// threads running independent searches.
pub trait FlagProvider {
    fn get(&self, x: i32, y: i32, plane: i32) -> u32;
}

impl<F> FlagProvider for F
where
    F: Fn(i32, i32, i32) -> u32,
{
    #[inline]
    fn get(&self, x: i32, y: i32, plane: i32) -> u32 {
        self(x, y, plane)
    }
}
