/// Create a [`DynArray`](crate::DynArray) from a list of elements, or from
/// a single element repeated a number of times.
///
/// ```
/// use dyn_array::dyn_array;
///
/// let filled = dyn_array![-1; 5];
/// assert_eq!(filled, [-1, -1, -1, -1, -1]);
///
/// let listed = dyn_array![10, 20, 30];
/// assert_eq!(listed.len(), 3);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => (
        $crate::array::from_array([])
    );
    ($elem:expr; $n:expr) => (
        $crate::array::from_elem($elem, $n)
    );
    ($($x:expr),+ $(,)?) => (
        $crate::array::from_array([$($x),+])
    );
}
