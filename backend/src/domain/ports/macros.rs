//! Helper macro for port error enums.
//!
//! `define_port_error!` expands a compact variant list into a `thiserror`
//! enum plus one snake_case constructor per variant. Constructor parameters
//! accept `impl Into<T>` so call sites can pass `&str` for `String` fields.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Build the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };

    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( {
                    $(
                        #[doc = concat!("Value of `", stringify!($field), "` reported by the adapter.")]
                        $field : $ty
                    ),*
                } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Constructors and messages generated by `define_port_error!`.
    define_port_error! {
        pub enum SamplePortError {
            Unreachable => "target unreachable",
            Connection { message: String } => "connection failed: {message}",
            Timeout { seconds: u64 } => "timed out after {seconds}s",
            Rejected { table: String, rows: usize } => "{table} rejected {rows} rows",
        }
    }

    #[test]
    fn unit_variant_constructor_takes_no_arguments() {
        assert_eq!(SamplePortError::unreachable(), SamplePortError::Unreachable);
        assert_eq!(SamplePortError::unreachable().to_string(), "target unreachable");
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::connection("refused");
        assert_eq!(err.to_string(), "connection failed: refused");
    }

    #[test]
    fn numeric_fields_keep_their_type() {
        let err = SamplePortError::timeout(30_u64);
        assert_eq!(err.to_string(), "timed out after 30s");
    }

    #[test]
    fn mixed_fields_render_in_order() {
        let err = SamplePortError::rejected("runtime_app_7", 2_usize);
        assert_eq!(err.to_string(), "runtime_app_7 rejected 2 rows");
    }
}
