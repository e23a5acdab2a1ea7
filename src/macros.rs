/// Imports hash collections from `hashbrown` when the feature is on,
/// otherwise from `std::collections`.
#[macro_export]
#[doc(hidden)]
macro_rules! import_hash_collections {
    ($($t:ident),*) => {
        #[cfg(feature = "hashbrown")]
        use hashbrown::{$($t),*,};
        #[cfg(not(feature = "hashbrown"))]
        use std::collections::{$($t),*,};
    }
}

#[macro_export]
#[doc(hidden)]
macro_rules! cfg_std {
    ($($item:item)*) => {
        $(
            #[cfg(feature = "std")]
            #[cfg_attr(docsrs, doc(cfg(feature = "std")))]
            $item
        )*
    }
}
