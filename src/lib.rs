pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod value;

pub use crate::error::{Error, Result, UtfError};
pub use crate::options::{ParseOptions, WriteConfig, WriteState};
pub use crate::value::{Array, Key, Kind, Object, Value};

pub use crate::decode::{
    from_slice, from_slice_partial, from_slice_partial_with_options, from_slice_with_options,
    from_str, from_str_partial, from_str_partial_with_options, from_str_with_options, from_units,
    from_units_with_options, from_utf16, from_utf16_partial, from_utf16_partial_with_options,
    from_utf16_with_options, from_utf32, from_utf32_partial, from_utf32_partial_with_options,
    from_utf32_with_options,
};
pub use crate::encode::{to_string, to_string_with_config, to_writer, to_writer_with_config};
