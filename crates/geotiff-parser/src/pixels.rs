//! Typed pixel storage.

use tiff::decoder::DecodingResult;

/// Interleaved (chunky) sample buffer in the raster's native sample type.
#[derive(Debug, Clone, PartialEq)]
pub enum PixelBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    I8(Vec<i8>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl PixelBuffer {
    /// Number of samples held (pixels × samples per pixel).
    pub fn len(&self) -> usize {
        match self {
            PixelBuffer::U8(v) => v.len(),
            PixelBuffer::U16(v) => v.len(),
            PixelBuffer::U32(v) => v.len(),
            PixelBuffer::U64(v) => v.len(),
            PixelBuffer::I8(v) => v.len(),
            PixelBuffer::I16(v) => v.len(),
            PixelBuffer::I32(v) => v.len(),
            PixelBuffer::I64(v) => v.len(),
            PixelBuffer::F32(v) => v.len(),
            PixelBuffer::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sample at a flat index, widened to f64.
    pub fn get(&self, index: usize) -> Option<f64> {
        match self {
            PixelBuffer::U8(v) => v.get(index).map(|&s| f64::from(s)),
            PixelBuffer::U16(v) => v.get(index).map(|&s| f64::from(s)),
            PixelBuffer::U32(v) => v.get(index).map(|&s| f64::from(s)),
            PixelBuffer::U64(v) => v.get(index).map(|&s| s as f64),
            PixelBuffer::I8(v) => v.get(index).map(|&s| f64::from(s)),
            PixelBuffer::I16(v) => v.get(index).map(|&s| f64::from(s)),
            PixelBuffer::I32(v) => v.get(index).map(|&s| f64::from(s)),
            PixelBuffer::I64(v) => v.get(index).map(|&s| s as f64),
            PixelBuffer::F32(v) => v.get(index).map(|&s| f64::from(s)),
            PixelBuffer::F64(v) => v.get(index).copied(),
        }
    }

    /// Raw byte samples, when the buffer is 8-bit unsigned.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            PixelBuffer::U8(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the sample type, for metadata dumps.
    pub fn sample_type(&self) -> &'static str {
        match self {
            PixelBuffer::U8(_) => "u8",
            PixelBuffer::U16(_) => "u16",
            PixelBuffer::U32(_) => "u32",
            PixelBuffer::U64(_) => "u64",
            PixelBuffer::I8(_) => "i8",
            PixelBuffer::I16(_) => "i16",
            PixelBuffer::I32(_) => "i32",
            PixelBuffer::I64(_) => "i64",
            PixelBuffer::F32(_) => "f32",
            PixelBuffer::F64(_) => "f64",
        }
    }
}

impl From<DecodingResult> for PixelBuffer {
    fn from(result: DecodingResult) -> Self {
        match result {
            DecodingResult::U8(v) => PixelBuffer::U8(v),
            DecodingResult::U16(v) => PixelBuffer::U16(v),
            DecodingResult::U32(v) => PixelBuffer::U32(v),
            DecodingResult::U64(v) => PixelBuffer::U64(v),
            DecodingResult::I8(v) => PixelBuffer::I8(v),
            DecodingResult::I16(v) => PixelBuffer::I16(v),
            DecodingResult::I32(v) => PixelBuffer::I32(v),
            DecodingResult::I64(v) => PixelBuffer::I64(v),
            DecodingResult::F32(v) => PixelBuffer::F32(v),
            DecodingResult::F64(v) => PixelBuffer::F64(v),
        }
    }
}
