//! Quote, bracket and code-fence tracking.
//!
//! Enclosure state is a parity approximation: every pair type keeps its own
//! counter and the text is "inside" when any counter is unbalanced-open. The
//! relative nesting of different pair types is not tracked, so `(「)` still
//! reports an open quote. Erring towards "inside" keeps quotations from being
//! split.
//!
//! The splitter updates an [`EnclosureTracker`] and a [`FenceCounter`] once per
//! character; the prefix predicates below run the same trackers over
//! `text[..pos]` for one-off queries.

use super::chars::floor_char_boundary;

/// Code fence marker
pub const FENCE: &str = "```";

/// Whether an enclosure pair is a quotation or a bracket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnclosureKind {
    /// Quotation marks
    Quote,
    /// Parentheses and brackets
    Bracket,
}

/// A delimiter pair; symmetric pairs use the same character on both sides
#[derive(Debug, Clone, Copy)]
struct EnclosurePair {
    open: char,
    close: char,
    kind: EnclosureKind,
}

impl EnclosurePair {
    const fn new(open: char, close: char, kind: EnclosureKind) -> Self {
        Self { open, close, kind }
    }

    #[inline]
    fn is_symmetric(&self) -> bool {
        self.open == self.close
    }
}

const PAIRS: [EnclosurePair; 15] = [
    EnclosurePair::new('"', '"', EnclosureKind::Quote),
    EnclosurePair::new('\u{201C}', '\u{201D}', EnclosureKind::Quote), // “ ”
    EnclosurePair::new('\u{2018}', '\u{2019}', EnclosureKind::Quote), // ‘ ’
    EnclosurePair::new('「', '」', EnclosureKind::Quote),
    EnclosurePair::new('『', '』', EnclosureKind::Quote),
    EnclosurePair::new('«', '»', EnclosureKind::Quote),
    EnclosurePair::new('(', ')', EnclosureKind::Bracket),
    EnclosurePair::new('（', '）', EnclosureKind::Bracket),
    EnclosurePair::new('[', ']', EnclosureKind::Bracket),
    EnclosurePair::new('{', '}', EnclosureKind::Bracket),
    EnclosurePair::new('【', '】', EnclosureKind::Bracket),
    EnclosurePair::new('《', '》', EnclosureKind::Bracket),
    EnclosurePair::new('〈', '〉', EnclosureKind::Bracket),
    EnclosurePair::new('〔', '〕', EnclosureKind::Bracket),
    EnclosurePair::new('［', '］', EnclosureKind::Bracket),
];

/// Running open/close counters for every enclosure pair
#[derive(Debug, Clone, Default)]
pub struct EnclosureTracker {
    opens: [usize; PAIRS.len()],
    closes: [usize; PAIRS.len()],
}

impl EnclosureTracker {
    /// Creates a tracker with all counters at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Accounts for one more character of the text
    #[inline]
    pub fn observe(&mut self, ch: char) {
        for (idx, pair) in PAIRS.iter().enumerate() {
            if ch == pair.open {
                self.opens[idx] += 1;
            } else if ch == pair.close {
                self.closes[idx] += 1;
            }
        }
    }

    fn is_open(&self, idx: usize) -> bool {
        if PAIRS[idx].is_symmetric() {
            self.opens[idx] % 2 == 1
        } else {
            self.opens[idx] > self.closes[idx]
        }
    }

    fn any_open(&self, kind: EnclosureKind) -> bool {
        PAIRS
            .iter()
            .enumerate()
            .any(|(idx, pair)| pair.kind == kind && self.is_open(idx))
    }

    /// True while any quotation pair is open
    pub fn in_quote(&self) -> bool {
        self.any_open(EnclosureKind::Quote)
    }

    /// True while any bracket pair is open
    pub fn in_bracket(&self) -> bool {
        self.any_open(EnclosureKind::Bracket)
    }

    /// True while any pair of either kind is open
    pub fn is_inside(&self) -> bool {
        (0..PAIRS.len()).any(|idx| self.is_open(idx))
    }
}

/// Counts non-overlapping code fences in the prefix scanned so far
#[derive(Debug, Clone, Default)]
pub struct FenceCounter {
    count: usize,
    pending_end: Option<usize>,
    next_allowed: usize,
    closed_end: Option<usize>,
}

impl FenceCounter {
    /// Creates a counter that has seen no fences
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances to byte offset `pos` of `text`.
    ///
    /// Must be called with increasing offsets. Afterwards the counter covers
    /// exactly the fences contained in `text[..pos]`.
    pub fn advance_to(&mut self, text: &str, pos: usize) {
        if let Some(end) = self.pending_end {
            if end <= pos {
                self.count += 1;
                self.pending_end = None;
                self.closed_end = (self.count % 2 == 0).then_some(end);
            }
        }
        if self.pending_end.is_none()
            && pos >= self.next_allowed
            && text.get(pos..).is_some_and(|rest| rest.starts_with(FENCE))
        {
            self.pending_end = Some(pos + FENCE.len());
            self.next_allowed = pos + FENCE.len();
        }
    }

    /// Number of completed fences
    pub fn count(&self) -> usize {
        self.count
    }

    /// True when an odd number of fences has been passed
    pub fn in_code_block(&self) -> bool {
        self.count % 2 == 1
    }

    /// True when only whitespace separates `pos` from the most recent
    /// closing fence, i.e. `pos` is still on the fence's own line.
    pub fn on_closing_fence_line(&self, text: &str, pos: usize) -> bool {
        match self.closed_end {
            Some(end) if !self.in_code_block() && end <= pos => text
                .get(end..pos)
                .is_some_and(|gap| gap.chars().all(|c| c == ' ' || c == '\t' || c == '\r')),
            _ => false,
        }
    }
}

fn tracker_for_prefix(text: &str, pos: usize) -> EnclosureTracker {
    let end = floor_char_boundary(text, pos);
    let mut tracker = EnclosureTracker::new();
    text[..end].chars().for_each(|ch| tracker.observe(ch));
    tracker
}

/// True if position `pos` of `text` lies inside an unbalanced quotation
pub fn is_in_quote(text: &str, pos: usize) -> bool {
    tracker_for_prefix(text, pos).in_quote()
}

/// True if position `pos` of `text` lies inside an unbalanced bracket
pub fn is_in_bracket(text: &str, pos: usize) -> bool {
    tracker_for_prefix(text, pos).in_bracket()
}

/// True if position `pos` of `text` lies inside a fenced code block
pub fn is_in_code_block(text: &str, pos: usize) -> bool {
    let end = floor_char_boundary(text, pos);
    text[..end].matches(FENCE).count() % 2 == 1
}
