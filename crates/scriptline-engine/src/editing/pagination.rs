//! Page break computation from measured line heights.
//!
//! The rendering layer reports how tall each line came out after painting;
//! the [`Paginator`] turns those heights into the indices of lines that start
//! a new page. Breaks are derived state and are recomputed from scratch.

/// A4 page height in CSS pixels at 96 dpi
pub const DEFAULT_PAGE_HEIGHT: f64 = 1120.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaginationError {
    #[error("Page height must be a positive number, got {0}")]
    InvalidPageHeight(f64),
}

/// Rendered pixel height of each line, indexed by line position.
///
/// Heights come from the painter and are treated as approximate: missing,
/// negative and non-finite entries count as zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Geometry {
    heights: Vec<f64>,
}

impl Geometry {
    pub fn new(heights: Vec<f64>) -> Self {
        Self { heights }
    }

    /// Every line measured at the same height
    pub fn uniform(line_count: usize, height: f64) -> Self {
        Self::new(vec![height; line_count])
    }

    pub fn height_of(&self, index: usize) -> f64 {
        match self.heights.get(index) {
            Some(&h) if h.is_finite() && h > 0.0 => h,
            _ => 0.0,
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}

impl From<Vec<f64>> for Geometry {
    fn from(heights: Vec<f64>) -> Self {
        Self::new(heights)
    }
}

impl FromIterator<f64> for Geometry {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Strictly increasing line indices; a page boundary sits before each one
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageBreakSet(Vec<usize>);

impl PageBreakSet {
    pub fn as_slice(&self) -> &[usize] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.0.iter().copied()
    }

    /// Whether a page boundary is drawn immediately before `line`
    pub fn breaks_before(&self, line: usize) -> bool {
        self.0.binary_search(&line).is_ok()
    }

    pub fn page_count(&self) -> usize {
        self.0.len() + 1
    }

    /// 1-based page number holding `line`
    pub fn page_of(&self, line: usize) -> usize {
        self.0.partition_point(|&b| b <= line) + 1
    }
}

/// Holds the page budget and the last computed break set
#[derive(Debug, Clone)]
pub struct Paginator {
    page_height: f64,
    breaks: PageBreakSet,
}

impl Paginator {
    pub fn new(page_height: f64) -> Result<Self, PaginationError> {
        if !page_height.is_finite() || page_height <= 0.0 {
            return Err(PaginationError::InvalidPageHeight(page_height));
        }
        Ok(Self {
            page_height,
            breaks: PageBreakSet::default(),
        })
    }

    pub fn page_height(&self) -> f64 {
        self.page_height
    }

    pub fn breaks(&self) -> &PageBreakSet {
        &self.breaks
    }

    /// Single pass over `line_count` lines.
    ///
    /// When the running height exceeds the page, the overflowing line opens
    /// the next page and the accumulator restarts at its height. A line that
    /// is already first on its page never breaks before itself, however tall.
    pub fn compute(&self, line_count: usize, geometry: &Geometry) -> PageBreakSet {
        let mut breaks = Vec::new();
        let mut height = 0.0;
        let mut page_start = 0;

        for index in 0..line_count {
            let line_height = geometry.height_of(index);
            height += line_height;

            if height > self.page_height && index > page_start {
                breaks.push(index);
                page_start = index;
                height = line_height;
            }
        }

        PageBreakSet(breaks)
    }

    /// Recompute and store the breaks, returning whether they changed
    pub fn recompute(&mut self, line_count: usize, geometry: &Geometry) -> bool {
        let breaks = self.compute(line_count, geometry);
        log::trace!(
            "Paginated {line_count} lines at {} px: breaks {:?}",
            self.page_height,
            breaks.as_slice()
        );
        if breaks == self.breaks {
            return false;
        }
        self.breaks = breaks;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(vec![300.0, 300.0, 300.0, 300.0, 300.0], vec![3])]
    #[case(vec![1200.0], vec![])]
    #[case(vec![1200.0, 300.0], vec![1])]
    #[case(vec![300.0, 1200.0, 300.0], vec![1, 2])]
    #[case(vec![500.0, 500.0, 500.0], vec![2])]
    #[case(vec![400.0; 8], vec![2, 4, 6])]
    #[case(vec![], vec![])]
    fn test_breaks_at_page_height_1000(#[case] heights: Vec<f64>, #[case] expected: Vec<usize>) {
        let paginator = Paginator::new(1000.0).unwrap();
        let geometry = Geometry::new(heights.clone());

        let breaks = paginator.compute(heights.len(), &geometry);

        assert_eq!(breaks.as_slice(), expected.as_slice());
    }

    #[test]
    fn test_geometry_past_line_count_is_ignored() {
        let paginator = Paginator::new(1000.0).unwrap();
        let geometry = Geometry::new(vec![300.0, 300.0, 900.0, 900.0]);

        let breaks = paginator.compute(2, &geometry);

        assert!(breaks.is_empty());
    }

    #[test]
    fn test_exactly_full_page_does_not_break() {
        let paginator = Paginator::new(1000.0).unwrap();
        let geometry = Geometry::uniform(4, 250.0);
        assert!(paginator.compute(4, &geometry).is_empty());
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut paginator = Paginator::new(1000.0).unwrap();
        let geometry = Geometry::uniform(5, 300.0);

        assert!(paginator.recompute(5, &geometry));
        let first = paginator.breaks().clone();

        assert!(!paginator.recompute(5, &geometry));
        assert_eq!(paginator.breaks(), &first);
    }

    #[test]
    fn test_recompute_reports_removed_breaks() {
        let mut paginator = Paginator::new(1000.0).unwrap();
        paginator.recompute(5, &Geometry::uniform(5, 300.0));

        assert!(paginator.recompute(2, &Geometry::uniform(2, 300.0)));
        assert!(paginator.breaks().is_empty());
    }

    #[test]
    fn test_untrusted_heights_count_as_zero() {
        let paginator = Paginator::new(1000.0).unwrap();
        let geometry = Geometry::new(vec![900.0, f64::NAN, -50.0, f64::INFINITY, 50.0, 100.0]);

        // Missing trailing measurement for line 6 counts as zero too
        let breaks = paginator.compute(7, &geometry);

        assert_eq!(breaks.as_slice(), &[5]);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn test_rejects_invalid_page_height(#[case] height: f64) {
        assert!(matches!(
            Paginator::new(height),
            Err(PaginationError::InvalidPageHeight(_))
        ));
    }

    #[test]
    fn test_page_numbers() {
        let paginator = Paginator::new(1000.0).unwrap();
        let breaks = paginator.compute(8, &Geometry::uniform(8, 400.0));

        assert_eq!(breaks.page_count(), 4);
        assert_eq!(breaks.page_of(0), 1);
        assert_eq!(breaks.page_of(1), 1);
        assert_eq!(breaks.page_of(2), 2);
        assert_eq!(breaks.page_of(7), 4);
        assert!(breaks.breaks_before(4));
        assert!(!breaks.breaks_before(5));
    }
}
