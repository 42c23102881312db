// THEORY:
// The `Pixel` module is the most fundamental unit of the screening engine. It is
// a "dumb" data container for a single pixel of a decoded eye photograph. It
// holds the raw RGBA channel bytes and nothing else; it performs no analysis on
// its own. Anything that needs more than one pixel (region means, redness
// ratios) belongs in higher-level modules like `Roi` and the estimator.
//
// Key architectural principles:
// 1.  **Single-pixel scope**: A `Pixel` never reads neighbors. It is the raw
//     material that regional summarization consumes.
// 2.  **Byte-scale channels**: All channels are kept on the 0-255 scale. Every
//     threshold and calibration constant downstream assumes this scale, so no
//     other representation exists in the crate.
// 3.  **Alpha passthrough**: Decoded buffers arrive as RGBA. Alpha is carried
//     so that 4-byte slices convert losslessly, but it never participates in
//     any color statistic.

pub mod pixel {
    pub type Byte = u8;
    pub type Bytes = Vec<Byte>;
    pub type Channel = Byte;

    const CHANNELS: usize = 4;

    /// A "dumb" data container representing a single RGBA pixel.
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct Pixel {
        /// The red channel value (0-255).
        pub red: Channel,
        /// The green channel value (0-255).
        pub green: Channel,
        /// The blue channel value (0-255).
        pub blue: Channel,
        /// The alpha (transparency) channel value (0-255).
        pub alpha: Channel,
    }

    impl Pixel {
        pub fn new(red: Channel, green: Channel, blue: Channel, alpha: Channel) -> Self {
            Pixel {
                red,
                green,
                blue,
                alpha,
            }
        }
    }

    impl From<&[Byte]> for Pixel {
        fn from(bytes: &[Byte]) -> Self {
            if bytes.len() != CHANNELS {
                panic!("Cannot convert {} bytes into pixel.", bytes.len());
            }
            Pixel::new(bytes[0], bytes[1], bytes[2], bytes[3])
        }
    }

    impl From<Pixel> for Bytes {
        fn from(pixel: Pixel) -> Self {
            vec![pixel.red, pixel.green, pixel.blue, pixel.alpha]
        }
    }
}
