//! Typed numeric sample buffers.
//!
//! A raster arrives from the data source as one of several element types.
//! [`SampleBuffer`] keeps the samples in their native type and reads them
//! back as `f64` with the usual `as` conversion: exact for every type up to
//! 32 bits, best-effort for 64-bit integers.

use num_traits::AsPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Element type tag for raw sample data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    F32,
    F64,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
}

impl DataType {
    /// Size of one element in bytes.
    pub fn element_size(&self) -> usize {
        match self {
            DataType::U8 | DataType::I8 => 1,
            DataType::U16 | DataType::I16 => 2,
            DataType::F32 | DataType::U32 | DataType::I32 => 4,
            DataType::F64 | DataType::U64 | DataType::I64 => 8,
        }
    }

    /// Parse a type name such as `"u16"` or `"float"`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "f32" | "float" => Some(DataType::F32),
            "f64" | "double" => Some(DataType::F64),
            "u8" | "uint8" => Some(DataType::U8),
            "u16" | "uint16" => Some(DataType::U16),
            "u32" | "uint32" => Some(DataType::U32),
            "u64" | "uint64" => Some(DataType::U64),
            "i8" | "int8" => Some(DataType::I8),
            "i16" | "int16" => Some(DataType::I16),
            "i32" | "int32" => Some(DataType::I32),
            "i64" | "int64" => Some(DataType::I64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::F32 => "f32",
            DataType::F64 => "f64",
            DataType::U8 => "u8",
            DataType::U16 => "u16",
            DataType::U32 => "u32",
            DataType::U64 => "u64",
            DataType::I8 => "i8",
            DataType::I16 => "i16",
            DataType::I32 => "i32",
            DataType::I64 => "i64",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = BufferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| BufferError::UnknownDataType(s.to_string()))
    }
}

/// Errors raised while building a sample buffer.
#[derive(Debug, Error)]
pub enum BufferError {
    #[error("byte length {len} is not a multiple of the {data_type} element size")]
    ByteLengthMismatch { data_type: DataType, len: usize },

    #[error("unknown data type: {0}")]
    UnknownDataType(String),
}

/// Owned raster samples, tagged by element type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "values", rename_all = "lowercase")]
pub enum SampleBuffer {
    F32(Vec<f32>),
    F64(Vec<f64>),
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
}

/// Expand `$body` once per variant with `$v` bound to the inner vector.
macro_rules! dispatch {
    ($buf:expr, $v:ident => $body:expr) => {
        match $buf {
            SampleBuffer::F32($v) => $body,
            SampleBuffer::F64($v) => $body,
            SampleBuffer::U8($v) => $body,
            SampleBuffer::U16($v) => $body,
            SampleBuffer::U32($v) => $body,
            SampleBuffer::U64($v) => $body,
            SampleBuffer::I8($v) => $body,
            SampleBuffer::I16($v) => $body,
            SampleBuffer::I32($v) => $body,
            SampleBuffer::I64($v) => $body,
        }
    };
}

#[inline]
fn read<T: AsPrimitive<f64>>(values: &[T], idx: usize) -> f64 {
    values[idx].as_()
}

fn decode<T: bytemuck::Pod>(bytes: &[u8]) -> Vec<T> {
    bytes
        .chunks_exact(std::mem::size_of::<T>())
        .map(bytemuck::pod_read_unaligned)
        .collect()
}

impl SampleBuffer {
    /// Decode native-endian raw bytes into a typed buffer.
    pub fn from_bytes(data_type: DataType, bytes: &[u8]) -> Result<Self, BufferError> {
        if bytes.len() % data_type.element_size() != 0 {
            return Err(BufferError::ByteLengthMismatch {
                data_type,
                len: bytes.len(),
            });
        }

        Ok(match data_type {
            DataType::F32 => SampleBuffer::F32(decode(bytes)),
            DataType::F64 => SampleBuffer::F64(decode(bytes)),
            DataType::U8 => SampleBuffer::U8(bytes.to_vec()),
            DataType::U16 => SampleBuffer::U16(decode(bytes)),
            DataType::U32 => SampleBuffer::U32(decode(bytes)),
            DataType::U64 => SampleBuffer::U64(decode(bytes)),
            DataType::I8 => SampleBuffer::I8(decode(bytes)),
            DataType::I16 => SampleBuffer::I16(decode(bytes)),
            DataType::I32 => SampleBuffer::I32(decode(bytes)),
            DataType::I64 => SampleBuffer::I64(decode(bytes)),
        })
    }

    pub fn data_type(&self) -> DataType {
        match self {
            SampleBuffer::F32(_) => DataType::F32,
            SampleBuffer::F64(_) => DataType::F64,
            SampleBuffer::U8(_) => DataType::U8,
            SampleBuffer::U16(_) => DataType::U16,
            SampleBuffer::U32(_) => DataType::U32,
            SampleBuffer::U64(_) => DataType::U64,
            SampleBuffer::I8(_) => DataType::I8,
            SampleBuffer::I16(_) => DataType::I16,
            SampleBuffer::I32(_) => DataType::I32,
            SampleBuffer::I64(_) => DataType::I64,
        }
    }

    pub fn len(&self) -> usize {
        dispatch!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the sample at flat index `idx` as `f64`.
    ///
    /// Panics if `idx` is out of range.
    #[inline]
    pub fn value(&self, idx: usize) -> f64 {
        dispatch!(self, v => read(v.as_slice(), idx))
    }

    /// Iterate over all samples as `f64`.
    pub fn iter_f64(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(move |idx| self.value(idx))
    }

    /// Minimum and maximum over the finite samples, `None` if there are none.
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.iter_f64()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((min, max)) => Some((min.min(v), max.max(v))),
            })
    }
}

macro_rules! impl_from_vec {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$t>> for SampleBuffer {
                fn from(values: Vec<$t>) -> Self {
                    SampleBuffer::$variant(values)
                }
            }
        )*
    };
}

impl_from_vec!(
    f32 => F32,
    f64 => F64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
);
