//! Pixel buffers: owning storage and borrowed views.
//!
//! # Ownership
//!
//! - [`PixelBuffer`] owns its bytes and is released when dropped.
//! - [`PixelView`] borrows a rectangular window of some buffer's bytes. The
//!   lifetime parameter ties it to that buffer, so a view can never outlive
//!   the memory it points into and nothing needs to remember not to free it.
//!
//! Rows are `stride` bytes apart; a row may carry padding past
//! `width * bytes_per_pixel`. The last row of a view does not need its padding
//! to be present.

mod crop;
mod orient;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{Rect, Size};

pub use crop::{crop_display_rect, export_display_crop};
pub use orient::materialize;

/// Errors from buffer construction, cropping and materialization.
#[derive(Debug, Error, PartialEq)]
pub enum BufferError {
    /// The requested window does not fit inside the buffer.
    #[error("Rectangle {rect:?} is out of bounds for a {width}x{height} buffer")]
    OutOfBounds { rect: Rect, width: u32, height: u32 },

    /// The rectangle has a NaN or infinite component.
    #[error("Rectangle {rect:?} has a non-finite coordinate")]
    NonFiniteRect { rect: Rect },

    /// Memory for a new buffer could not be obtained.
    #[error("Failed to allocate {bytes} bytes for pixel buffer")]
    Allocation { bytes: usize },

    /// Stride or data length don't describe a valid buffer.
    #[error("Invalid buffer layout: {width}x{height}, stride {stride}, {len} bytes")]
    InvalidLayout {
        width: u32,
        height: u32,
        stride: usize,
        len: usize,
    },
}

/// In-memory pixel layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PixelFormat {
    /// 8-bit luminance.
    Gray8,
    /// 8-bit luminance + alpha.
    GrayAlpha8,
    /// 8-bit RGB.
    Rgb8,
    /// 8-bit RGBA.
    #[default]
    Rgba8,
    /// 16-bit RGBA, native endian.
    Rgba16,
}

impl PixelFormat {
    #[inline]
    pub fn bits_per_pixel(self) -> usize {
        self.bytes_per_pixel() * 8
    }

    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Gray8 => 1,
            PixelFormat::GrayAlpha8 => 2,
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
            PixelFormat::Rgba16 => 8,
        }
    }

    pub fn has_alpha(self) -> bool {
        matches!(
            self,
            PixelFormat::GrayAlpha8 | PixelFormat::Rgba8 | PixelFormat::Rgba16
        )
    }
}

/// Bytes needed to hold `height` rows of `width` pixels `stride` apart.
///
/// `None` on arithmetic overflow.
fn required_len(width: u32, height: u32, stride: usize, format: PixelFormat) -> Option<usize> {
    if width == 0 || height == 0 {
        return Some(0);
    }
    let row = (width as usize).checked_mul(format.bytes_per_pixel())?;
    (height as usize - 1).checked_mul(stride)?.checked_add(row)
}

/// An owning pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Create a tightly packed buffer from existing pixel data.
    pub fn new(
        width: u32,
        height: u32,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let stride = (width as usize).saturating_mul(format.bytes_per_pixel());
        Self::with_stride(width, height, stride, format, data)
    }

    /// Create a buffer whose rows are `stride` bytes apart.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::InvalidLayout` if `stride` is shorter than a row
    /// or `data` is too short for the last row.
    pub fn with_stride(
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let layout_error = || BufferError::InvalidLayout {
            width,
            height,
            stride,
            len: data.len(),
        };

        let row = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(layout_error)?;
        if stride < row {
            return Err(layout_error());
        }
        let needed = required_len(width, height, stride, format).ok_or_else(layout_error)?;
        if data.len() < needed {
            return Err(layout_error());
        }

        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// Allocate a zeroed, tightly packed buffer.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::Allocation` if the size overflows or the
    /// allocator refuses.
    pub fn zeroed(width: u32, height: u32, format: PixelFormat) -> Result<Self, BufferError> {
        let stride = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or(BufferError::Allocation { bytes: usize::MAX })?;
        let len = stride
            .checked_mul(height as usize)
            .ok_or(BufferError::Allocation { bytes: usize::MAX })?;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| BufferError::Allocation { bytes: len })?;
        data.resize(len, 0);

        Ok(Self {
            width,
            height,
            stride,
            format,
            data,
        })
    }

    /// A view covering the whole buffer.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            data: &self.data,
            offset: 0,
            width: self.width,
            height: self.height,
            stride: self.stride,
            format: self.format,
        }
    }

    /// Zero-copy crop. See [`PixelView::crop`].
    pub fn crop(&self, rect: Rect) -> Result<PixelView<'_>, BufferError> {
        self.view().crop(rect)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    /// Raw bytes, including any row padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Whether rows follow each other without padding.
    pub fn is_packed(&self) -> bool {
        self.stride == self.width as usize * self.format.bytes_per_pixel()
    }

    pub(crate) fn row_mut(&mut self, y: u32) -> &mut [u8] {
        let len = self.width as usize * self.format.bytes_per_pixel();
        if len == 0 {
            return &mut [];
        }
        let start = y as usize * self.stride;
        &mut self.data[start..start + len]
    }
}

/// A borrowed window into a pixel buffer.
///
/// `offset` is the byte index of the window's first pixel inside the parent
/// memory; rows are `stride` bytes apart, exactly as in the parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelView<'a> {
    data: &'a [u8],
    offset: usize,
    width: u32,
    height: u32,
    stride: usize,
    format: PixelFormat,
}

impl<'a> PixelView<'a> {
    /// View borrowed pixel memory without copying it.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::InvalidLayout` if the memory can't hold the
    /// described grid.
    pub fn from_bytes(
        data: &'a [u8],
        width: u32,
        height: u32,
        stride: usize,
        format: PixelFormat,
    ) -> Result<Self, BufferError> {
        let layout_error = || BufferError::InvalidLayout {
            width,
            height,
            stride,
            len: data.len(),
        };

        let row = (width as usize)
            .checked_mul(format.bytes_per_pixel())
            .ok_or_else(layout_error)?;
        if stride < row {
            return Err(layout_error());
        }
        let needed = required_len(width, height, stride, format).ok_or_else(layout_error)?;
        if data.len() < needed {
            return Err(layout_error());
        }

        Ok(Self {
            data,
            offset: 0,
            width,
            height,
            stride,
            format,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Byte offset of the first pixel inside the parent's memory.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    /// The parent's memory this view points into.
    pub fn parent_bytes(&self) -> &'a [u8] {
        self.data
    }

    /// Pixel bytes of row `y`, without padding.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    pub fn row(&self, y: u32) -> &'a [u8] {
        assert!(y < self.height, "row {y} out of range (height {})", self.height);
        let len = self.width as usize * self.format.bytes_per_pixel();
        if len == 0 {
            // Zero-width layouts don't need any backing memory
            return &[];
        }
        let start = self.offset + y as usize * self.stride;
        &self.data[start..start + len]
    }

    /// Rows from top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let view = *self;
        (0..view.height).map(move |y| view.row(y))
    }

    /// Bytes of the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if `x >= width` or `y >= height`.
    pub fn pixel(&self, x: u32, y: u32) -> &'a [u8] {
        let bpp = self.format.bytes_per_pixel();
        let start = x as usize * bpp;
        &self.row(y)[start..start + bpp]
    }

    /// Copy the window into a new, tightly packed owning buffer.
    ///
    /// # Errors
    ///
    /// Returns `BufferError::Allocation` if the copy can't be allocated.
    pub fn to_buffer(&self) -> Result<PixelBuffer, BufferError> {
        let mut out = PixelBuffer::zeroed(self.width, self.height, self.format)?;
        for (y, row) in self.rows().enumerate() {
            out.row_mut(y as u32).copy_from_slice(row);
        }
        Ok(out)
    }
}
