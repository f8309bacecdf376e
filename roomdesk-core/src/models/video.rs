use serde::{Deserialize, Serialize};

/// Pixel dimensions of a video surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct VideoSize {
    pub width: u32,
    pub height: u32,
}

impl VideoSize {
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Media metadata reports 0x0 until the first frame is decoded.
    #[must_use]
    pub const fn is_known(&self) -> bool {
        self.width != 0 && self.height != 0
    }

    /// Scale to `width` keeping this size's aspect ratio.
    ///
    /// Returns `None` while the dimensions are still unknown.
    #[must_use]
    pub fn fit_width(&self, width: u32) -> Option<Self> {
        if !self.is_known() {
            return None;
        }
        let height = u64::from(self.height) * u64::from(width);
        let height = (height + u64::from(self.width) / 2) / u64::from(self.width);
        let height = u32::try_from(height).unwrap_or(u32::MAX);
        Some(Self::new(width, height))
    }
}

impl std::fmt::Display for VideoSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for VideoSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (width, height) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| format!("expected WIDTHxHEIGHT, got {s:?}"))?;
        let width = width
            .trim()
            .parse()
            .map_err(|e| format!("invalid width {width:?}: {e}"))?;
        let height = height
            .trim()
            .parse()
            .map_err(|e| format!("invalid height {height:?}: {e}"))?;
        Ok(Self::new(width, height))
    }
}
