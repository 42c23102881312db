// THEORY:
// The `Roi` module represents a user-selected rectangular sample of an eye
// photograph. It is the unit of regional analysis for the whole engine: every
// estimate starts from the average color of two of these regions. Averaging
// serves two purposes at once.
//
// Key architectural principles:
// 1.  **Spatial Pooling**: A screening decision is never made from individual
//     pixels. Collapsing a region to its mean color moves the analysis from
//     thousands of noisy samples to one robust statistic.
// 2.  **Noise Reduction**: The core operation of a region is `mean_color`. The
//     mean cancels single-pixel noise (sensor grain, eyelash edges, specular
//     dots) so that only the spatially coherent tissue color survives.
// 3.  **Data Container**: Like `Pixel`, `Roi` is a "dumb" data container. It
//     holds a `Vec<Pixel>` and knows how to summarize its own data. It does
//     not know whether it depicts tissue; that judgement belongs to the
//     region validator.
//
// The output of a `Roi` (its `ColorSample`) becomes the input for region
// validation and hemoglobin estimation. Both regions of one eye must come from
// the same photograph; the engine cannot verify that pairing, the caller
// guarantees it.

pub mod roi {
    use crate::core_modules::pixel::pixel::Pixel;
    use crate::error::RegionError;

    pub type ChannelMean = f64;

    const BYTES_PER_PIXEL: u32 = 4;

    /// The mean RGB triple of a region, on the 0.0-255.0 scale.
    /// Derived from a `Roi`, never persisted.
    #[derive(Debug, Clone, Copy, Default, PartialEq)]
    pub struct ColorSample {
        /// Mean red channel value (0.0-255.0).
        pub red: ChannelMean,
        /// Mean green channel value (0.0-255.0).
        pub green: ChannelMean,
        /// Mean blue channel value (0.0-255.0).
        pub blue: ChannelMean,
    }

    impl ColorSample {
        pub fn new(red: ChannelMean, green: ChannelMean, blue: ChannelMean) -> Self {
            Self { red, green, blue }
        }
    }

    /// A rectangular selection on a photograph, in pixel coordinates.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct RegionRect {
        /// The left edge of the selection in pixels.
        pub x: u32,
        /// The top edge of the selection in pixels.
        pub y: u32,
        /// The width of the selection in pixels.
        pub width: u32,
        /// The height of the selection in pixels.
        pub height: u32,
    }

    /// A "dumb" data container representing a rectangular block of pixels
    /// sampled from one photograph.
    pub struct Roi {
        /// The width of the region in pixels.
        pub width: u32,
        /// The height of the region in pixels.
        pub height: u32,
        /// A flattened vector containing all the `Pixel` data within this region.
        pub pixels: Vec<Pixel>,
    }

    impl Roi {
        pub fn new(width: u32, height: u32, pixels: Vec<Pixel>) -> Self {
            Self {
                width,
                height,
                pixels,
            }
        }

        /// Extracts a region from a raw RGBA frame buffer.
        ///
        /// The buffer layout is the row-major RGBA byte stream produced by
        /// decoding a photograph. A zero-area rectangle or one that reaches
        /// outside the image is an error, never a silent empty sample.
        pub fn from_rgba_buffer(
            buffer: &[u8],
            image_width: u32,
            image_height: u32,
            rect: RegionRect,
        ) -> Result<Self, RegionError> {
            if rect.width == 0 || rect.height == 0 {
                return Err(RegionError::EmptyRegion {
                    width: rect.width,
                    height: rect.height,
                });
            }
            if rect.x as u64 + rect.width as u64 > image_width as u64
                || rect.y as u64 + rect.height as u64 > image_height as u64
            {
                return Err(RegionError::OutOfBounds {
                    x: rect.x,
                    y: rect.y,
                    width: rect.width,
                    height: rect.height,
                    image_width,
                    image_height,
                });
            }
            let expected =
                image_width as usize * image_height as usize * BYTES_PER_PIXEL as usize;
            if buffer.len() < expected {
                return Err(RegionError::BufferTooSmall {
                    expected,
                    actual: buffer.len(),
                });
            }

            let mut pixels = Vec::with_capacity((rect.width * rect.height) as usize);
            for i in 0..(rect.width * rect.height) {
                let y_offset = i / rect.width;
                let x_offset = i % rect.width;
                let pixel_y = rect.y + y_offset;
                let pixel_x = rect.x + x_offset;
                let byte_index = (((pixel_y * image_width) + pixel_x) * BYTES_PER_PIXEL) as usize;
                pixels.push(Pixel::from(&buffer[byte_index..byte_index + 4]));
            }

            Ok(Self::new(rect.width, rect.height, pixels))
        }

        /// Calculates the mean color of the entire region.
        /// This is the core operation for summarizing the region's state.
        pub fn mean_color(&self) -> ColorSample {
            let num_pixels = self.pixels.len();
            if num_pixels == 0 {
                return ColorSample::default();
            }

            // Accumulate in cache-friendly blocks, as the frame engine does.
            const BLOCK_SIZE: usize = 64;
            let mut sum_r = 0u64;
            let mut sum_g = 0u64;
            let mut sum_b = 0u64;

            for block in self.pixels.chunks(BLOCK_SIZE) {
                for pixel in block {
                    sum_r += pixel.red as u64;
                    sum_g += pixel.green as u64;
                    sum_b += pixel.blue as u64;
                }
            }

            ColorSample {
                red: sum_r as ChannelMean / num_pixels as ChannelMean,
                green: sum_g as ChannelMean / num_pixels as ChannelMean,
                blue: sum_b as ChannelMean / num_pixels as ChannelMean,
            }
        }
    }
}
