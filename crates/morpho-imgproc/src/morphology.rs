use morpho_image::GrayImage;

/// Offsets of the fixed 3x3 box neighborhood, (dy, dx) around the center.
const NEIGHBORS: [(i32, i32); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Selects which morphological operation to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MorphOp {
    /// Replace each pixel with the maximum value in its neighborhood.
    Dilate,
    /// Replace each pixel with the minimum value in its neighborhood.
    Erode,
}

impl std::fmt::Display for MorphOp {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MorphOp::Dilate => write!(f, "dilation"),
            MorphOp::Erode => write!(f, "erosion"),
        }
    }
}

/// Applies the selected morphological operation over a 3x3 neighborhood.
///
/// The result has the same dimensions as the input; a zero-area input
/// yields an empty image of the same dimensions.
pub fn apply(input: &GrayImage, op: MorphOp) -> GrayImage {
    match op {
        MorphOp::Dilate => dilate(input),
        MorphOp::Erode => erode(input),
    }
}

/// Applies standard 3x3 dilation.
///
/// Dilation expands bright regions: each pixel is replaced by the maximum
/// value in its 3x3 neighborhood. Neighbors falling outside the image are
/// skipped, no wraparound or border padding.
pub fn dilate(input: &GrayImage) -> GrayImage {
    let (width, height) = (input.width(), input.height());
    let mut output = input.zeros_like();

    for y in 0..height {
        for x in 0..width {
            let mut max_val = 0u8;

            for (dy, dx) in NEIGHBORS.iter() {
                let ny = y as i32 + dy;
                let nx = x as i32 + dx;

                if ny >= 0 && ny < height as i32 && nx >= 0 && nx < width as i32 {
                    let val = input.get_pixel(nx as usize, ny as usize);
                    max_val = max_val.max(val);
                }
            }

            output.put_pixel(x, y, max_val);
        }
    }

    output
}

/// Applies standard 3x3 erosion.
///
/// Erosion shrinks bright regions: each pixel is replaced by the minimum
/// value in its 3x3 neighborhood. Neighbors falling outside the image are
/// skipped, no wraparound or border padding.
pub fn erode(input: &GrayImage) -> GrayImage {
    let (width, height) = (input.width(), input.height());
    let mut output = input.zeros_like();

    for y in 0..height {
        for x in 0..width {
            let mut min_val = 255u8;

            for (dy, dx) in NEIGHBORS.iter() {
                let ny = y as i32 + dy;
                let nx = x as i32 + dx;

                if ny >= 0 && ny < height as i32 && nx >= 0 && nx < width as i32 {
                    let val = input.get_pixel(nx as usize, ny as usize);
                    min_val = min_val.min(val);
                }
            }

            output.put_pixel(x, y, min_val);
        }
    }

    output
}

/// Opening: erosion followed by dilation.
///
/// Removes small bright specks and smooths object boundaries.
pub fn open(input: &GrayImage) -> GrayImage {
    dilate(&erode(input))
}

/// Closing: dilation followed by erosion.
///
/// Fills small dark holes and smooths object boundaries.
pub fn close(input: &GrayImage) -> GrayImage {
    erode(&dilate(input))
}
