//! Glyph sprites and their collision masks.
//!
//! A sprite is a grid of logical pixels.  Every opaque pixel carries the
//! glyph used to draw it on the terminal; the mask is just the opaque set.

/// Characters that mark a transparent pixel in sprite text.
const TRANSPARENT: [char; 2] = ['.', ' '];

/// Lines starting with this character are ignored by the parser.
const COMMENT: char = ';';

// ── Mask ──────────────────────────────────────────────────────────────────────

/// Opaque-pixel bitmap used for pixel-perfect collision.
#[derive(Clone, Debug, PartialEq)]
pub struct Mask {
    width: usize,
    height: usize,
    bits: Vec<bool>,
}

impl Mask {
    fn from_pixels(width: usize, height: usize, pixels: &[Option<char>]) -> Self {
        Self {
            width,
            height,
            bits: pixels.iter().map(Option::is_some).collect(),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the pixel at (`x`, `y`) is set.  Out-of-range reads are clear.
    pub fn get(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        self.bits[y as usize * self.width + x as usize]
    }

    /// Number of set pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// First pixel (in `self`'s coordinates, row-major) where `self` and
    /// `other` are both set, with `other`'s top-left placed at `offset`.
    pub fn overlap(&self, other: &Mask, offset: (i32, i32)) -> Option<(i32, i32)> {
        let (dx, dy) = (offset.0 as i64, offset.1 as i64);

        // Intersection of the two bounding boxes, in self's space
        let x0 = dx.max(0);
        let y0 = dy.max(0);
        let x1 = (self.width as i64).min(dx + other.width as i64);
        let y1 = (self.height as i64).min(dy + other.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }

        for y in y0..y1 {
            for x in x0..x1 {
                if self.get(x, y) && other.get(x - dx, y - dy) {
                    return Some((x as i32, y as i32));
                }
            }
        }
        None
    }
}

// ── Sprite ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    width: usize,
    height: usize,
    /// Row-major; `None` is a transparent pixel.
    pixels: Vec<Option<char>>,
    mask: Mask,
}

impl Sprite {
    /// Build a sprite from a row-major pixel grid.
    ///
    /// Returns `None` for an empty grid or when `pixels` does not hold
    /// exactly `width * height` entries.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Option<char>>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return None;
        }
        let mask = Mask::from_pixels(width, height, &pixels);
        Some(Self {
            width,
            height,
            pixels,
            mask,
        })
    }

    /// Parse sprite text, expanding every text pixel into a
    /// `scale` × `scale` block of logical pixels.
    ///
    /// `.` and space are transparent; lines starting with `;` are comments;
    /// short rows are padded with transparency.  Returns `None` when the text
    /// holds no pixel rows or `scale` is zero.
    pub fn from_text(text: &str, scale: usize) -> Option<Self> {
        if scale == 0 {
            return None;
        }

        let mut rows: Vec<Vec<Option<char>>> = text
            .lines()
            .filter(|line| !line.starts_with(COMMENT))
            .map(|line| {
                line.chars()
                    .map(|c| if TRANSPARENT.contains(&c) { None } else { Some(c) })
                    .collect()
            })
            .collect();

        // Trailing blank lines are not pixel rows
        while rows.last().map(|r| r.is_empty()).unwrap_or(false) {
            rows.pop();
        }

        let text_w = rows.iter().map(Vec::len).max().unwrap_or(0);
        let text_h = rows.len();
        if text_w == 0 || text_h == 0 {
            return None;
        }

        let width = text_w * scale;
        let height = text_h * scale;
        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let row = &rows[y / scale];
            for x in 0..width {
                pixels.push(row.get(x / scale).copied().flatten());
            }
        }

        Self::from_pixels(width, height, pixels)
    }

    /// Nearest-neighbour resize to exactly `width` × `height`.
    pub fn scaled(&self, width: usize, height: usize) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        if width == self.width && height == self.height {
            return self.clone();
        }

        let mut pixels = Vec::with_capacity(width * height);
        for y in 0..height {
            let sy = (y * self.height) / height;
            for x in 0..width {
                let sx = (x * self.width) / width;
                pixels.push(self.pixels[sy * self.width + sx]);
            }
        }

        let mask = Mask::from_pixels(width, height, &pixels);
        Self {
            width,
            height,
            pixels,
            mask,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Glyph at (`x`, `y`), or `None` if transparent or out of range.
    pub fn glyph_at(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels[y * self.width + x]
    }

    /// First opaque glyph inside the half-open pixel rectangle
    /// `[x0, x1) × [y0, y1)`, clipped to the sprite.
    pub fn first_glyph_in(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Option<char> {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        (y0..y1).find_map(|y| (x0..x1).find_map(|x| self.pixels[y * self.width + x]))
    }
}
