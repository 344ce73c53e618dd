// patterns.rs - 5x5 templates injected into a running grid

/// Side length of every injectable template; also the smallest legal grid.
pub const PATTERN_SIZE: usize = 5;

pub type PatternCells = [[bool; PATTERN_SIZE]; PATTERN_SIZE];

/// A template addressed as `cells[dx][dy]`: the outer index is the x offset
/// from the injection origin, the inner index the y offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: PatternCells,
}

impl Pattern {
    const fn from_bits(name: &'static str, bits: [[u8; PATTERN_SIZE]; PATTERN_SIZE]) -> Self {
        let mut cells = [[false; PATTERN_SIZE]; PATTERN_SIZE];
        let mut dx = 0;
        while dx < PATTERN_SIZE {
            let mut dy = 0;
            while dy < PATTERN_SIZE {
                cells[dx][dy] = bits[dx][dy] == 1;
                dy += 1;
            }
            dx += 1;
        }
        Self { name, cells }
    }

    /// Number of cells the template forces alive.
    pub fn live_count(&self) -> usize {
        self.cells.iter().flatten().filter(|&&alive| alive).count()
    }
}

pub const GLIDER: Pattern = Pattern::from_bits("glider", [
    [0, 0, 1, 0, 0],
    [0, 0, 0, 1, 1],
    [1, 1, 0, 1, 0],
    [0, 0, 1, 1, 0],
    [0, 0, 0, 0, 0],
]);

pub const R_PENTOMINO: Pattern = Pattern::from_bits("r-pentomino", [
    [0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0],
    [0, 1, 1, 1, 0],
    [0, 1, 0, 0, 0],
    [0, 0, 0, 0, 0],
]);

pub const BLINKER: Pattern = Pattern::from_bits("blinker", [
    [0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0],
    [0, 0, 1, 0, 0],
    [0, 0, 0, 0, 0],
]);

pub const TOAD: Pattern = Pattern::from_bits("toad", [
    [0, 0, 0, 0, 0],
    [0, 0, 1, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 1, 0, 0, 0],
]);

pub const BLOCK: Pattern = Pattern::from_bits("block", [
    [0, 0, 0, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 1, 1, 0, 0],
    [0, 0, 0, 0, 0],
    [0, 0, 0, 0, 0],
]);

pub const PATTERNS: &[Pattern] = &[GLIDER, R_PENTOMINO, BLINKER, TOAD, BLOCK];

/// Looks a template up by name, ignoring ASCII case.
pub fn find_pattern(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|pattern| pattern.name.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glider_layout() {
        assert_eq!(GLIDER.live_count(), 8);
        assert!(GLIDER.cells[0][2]);
        assert!(GLIDER.cells[1][3] && GLIDER.cells[1][4]);
        assert!(GLIDER.cells[2][0] && GLIDER.cells[2][1] && GLIDER.cells[2][3]);
        assert!(!GLIDER.cells[4].iter().any(|&alive| alive));
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(find_pattern("Glider"), Some(&GLIDER));
        assert_eq!(find_pattern("R-PENTOMINO").map(|p| p.live_count()), Some(5));
        assert!(find_pattern("gosper").is_none());
    }

    #[test]
    fn names_are_unique() {
        for (i, a) in PATTERNS.iter().enumerate() {
            for b in &PATTERNS[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }
}
