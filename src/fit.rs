//! Shrink-to-fit text layout.
//!
//! Text is word-wrapped to the box width and the font size is walked down
//! from a starting size in fixed steps until the wrapped block fits the box
//! height, or the minimum size is reached.

/// Extra height allowed for descenders and line spacing when testing a fit.
pub const FIT_BUFFER: f32 = 2.0;
pub const DEFAULT_STEP: f32 = 0.5;

/// Text measurement primitive supplied by a font face.
pub trait TextMeasure {
    /// Horizontal advance of a single line of `text` at `size`.
    fn advance(&self, text: &str, size: f32) -> f32;
    /// Distance between consecutive baselines at `size`.
    fn line_height(&self, size: f32) -> f32;
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoxSize {
    pub width: f32,
    pub height: f32,
}

impl BoxSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Search range for [`fit_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitParams {
    pub start: f32,
    pub min: f32,
    pub step: f32,
}

impl FitParams {
    pub fn new(start: f32, min: f32, step: f32) -> Self {
        Self { start, min, step }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FitResult {
    pub font_size: f32,
    /// Size of the wrapped block at `font_size`.
    pub block: BoxSize,
    /// Offset from the top of the box that centers the block vertically.
    pub vertical_offset: f32,
    /// Wrapped lines at `font_size`.
    pub lines: Vec<String>,
}

/// Pick the largest size in `start, start - step, ...` (never below `min`)
/// whose wrapped block plus [`FIT_BUFFER`] fits `bounds.height`. At `min`
/// the result is returned even if the text still overflows.
pub fn fit_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    bounds: BoxSize,
    params: FitParams,
) -> FitResult {
    if text.trim().is_empty() {
        return FitResult {
            font_size: params.start,
            ..FitResult::default()
        };
    }

    let step = if params.step.is_finite() && params.step > 0.0 {
        params.step
    } else {
        DEFAULT_STEP
    };
    let min = if params.min.is_finite() { params.min } else { 0.0 };
    let start = if params.start.is_finite() {
        f64::from(params.start.max(min))
    } else {
        f64::from(min)
    };
    // Candidates come from a step counter rather than repeated subtraction,
    // which stalls once `step` drops below the precision of a large size.
    let mut k = 0u64;
    loop {
        let size = ((start - k as f64 * f64::from(step)) as f32).max(min);
        let lines = wrap_text(measure, text, size, bounds.width);
        let block = measure_block(measure, &lines, size);
        if block.height + FIT_BUFFER <= bounds.height || size <= min {
            return FitResult {
                font_size: size,
                block,
                vertical_offset: ((bounds.height - block.height) / 2.0).max(0.0),
                lines,
            };
        }
        k += 1;
    }
}

/// Greedy word wrap. Words wider than `max_width` on their own are broken
/// at character boundaries; every line holds at least one character.
pub fn wrap_text<M: TextMeasure + ?Sized>(
    measure: &M,
    text: &str,
    size: f32,
    max_width: f32,
) -> Vec<String> {
    let fits = |candidate: &str| measure.advance(candidate, size) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            if fits(word) {
                current.push_str(word);
                continue;
            }
        } else {
            let candidate = format!("{} {}", current, word);
            if fits(&candidate) {
                current = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut current));
            if fits(word) {
                current.push_str(word);
                continue;
            }
        }

        for ch in word.chars() {
            current.push(ch);
            if current.chars().count() > 1 && !fits(&current) {
                current.pop();
                lines.push(std::mem::take(&mut current));
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Bounding size of already wrapped lines.
pub fn measure_block<M: TextMeasure + ?Sized>(measure: &M, lines: &[String], size: f32) -> BoxSize {
    let width = lines
        .iter()
        .map(|line| measure.advance(line, size))
        .fold(0.0f32, f32::max);
    BoxSize {
        width,
        height: lines.len() as f32 * measure.line_height(size),
    }
}
