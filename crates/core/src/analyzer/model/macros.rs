// model/macros.rs
#[macro_export]
macro_rules! descriptor {
    // Optional
    (? $($inner:tt)+) => {
        $crate::analyzer::model::TypeDescriptor::optional($crate::descriptor!($($inner)+))
    };

    // Array type
    ([$($element:tt)+]) => {
        $crate::analyzer::model::TypeDescriptor::array($crate::descriptor!($($element)+))
    };

    // Map type
    ({ $key:tt : $($value:tt)+ }) => {
        $crate::analyzer::model::TypeDescriptor::map(
            $crate::descriptor!($key),
            $crate::descriptor!($($value)+),
        )
    };

    // Named type
    ($name:ident) => {
        $crate::analyzer::model::TypeDescriptor::named(stringify!($name))
    };
}
