/// Implements `From` conversions from vectors, slices and arrays of anything convertible into
/// the element type. The result is built with `CompositeGeometryTrait::push`, so it is flat.
#[macro_export]
macro_rules! impl_from_array {
	($($t:ty,$i:ty),*) => {$(
		impl<T> From<Vec<T>> for $t
		where
			$i: From<T>,
		{
			fn from(value: Vec<T>) -> Self {
				let mut result = <$t as $crate::types::CompositeGeometryTrait<$i>>::new();
				for item in value {
					$crate::types::CompositeGeometryTrait::push(&mut result, <$i>::from(item));
				}
				result
			}
		}

		impl<'a, T> From<&'a Vec<T>> for $t
		where
			$i: From<&'a T>,
		{
			fn from(value: &'a Vec<T>) -> Self {
				<$t>::from(value.as_slice())
			}
		}

		impl<'a, T> From<&'a [T]> for $t
		where
			$i: From<&'a T>,
		{
			fn from(value: &'a [T]) -> Self {
				let mut result = <$t as $crate::types::CompositeGeometryTrait<$i>>::new();
				for item in value {
					$crate::types::CompositeGeometryTrait::push(&mut result, <$i>::from(item));
				}
				result
			}
		}

		impl<'a, T, const N: usize> From<&'a [T; N]> for $t
		where
			$i: From<&'a T>,
		{
			fn from(value: &'a [T; N]) -> Self {
				<$t>::from(value.as_slice())
			}
		}
	)*}
}
