//! Character and string domains.

use crate::{arbitrary::*, collection::*, data::*, error::*, gen::*, integral::*};
use std::sync::Arc;

const SURROGATES: (u32, u32) = (0xD800, 0xDFFF);

/// Characters from a set of code point ranges.
///
/// Without any range configured all Unicode scalar values are included.
/// Characters shrink towards a space when the set contains one, else
/// towards the lowest code point.
#[derive(Debug, Clone, Default)]
pub struct CharArbitrary {
    ranges: Vec<(u32, u32)>,
}

impl CharArbitrary {
    pub fn new() -> Self {
        CharArbitrary::default()
    }

    /// Add all characters from `min` to `max` inclusive.
    pub fn range(mut self, min: char, max: char) -> Result<Self> {
        if min > max {
            return Err(FalsifyError::invalid_arbitrary(format!(
                "char range {min:?}..={max:?} is empty"
            )));
        }
        self.ranges.push((min as u32, max as u32));
        Ok(self)
    }

    /// Add the given characters.
    pub fn with_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.ranges
            .extend(chars.into_iter().map(|c| (c as u32, c as u32)));
        self
    }

    pub fn numeric(self) -> Self {
        self.with_range('0', '9')
    }

    pub fn lower(self) -> Self {
        self.with_range('a', 'z')
    }

    pub fn upper(self) -> Self {
        self.with_range('A', 'Z')
    }

    pub fn alpha(self) -> Self {
        self.upper().lower()
    }

    pub fn ascii(self) -> Self {
        self.with_range('\0', '\u{7f}')
    }

    fn with_range(mut self, min: char, max: char) -> Self {
        self.ranges.push((min as u32, max as u32));
        self
    }

    /// Sorted, merged ranges without surrogates.
    fn code_points(&self) -> Vec<(u32, u32)> {
        let mut ranges = if self.ranges.is_empty() {
            vec![(0, char::MAX as u32)]
        } else {
            self.ranges.clone()
        };
        ranges.sort_unstable();

        let mut merged: Vec<(u32, u32)> = Vec::new();
        for (low, high) in ranges {
            match merged.last_mut() {
                Some(last) if low <= last.1.saturating_add(1) => last.1 = last.1.max(high),
                _ => merged.push((low, high)),
            }
        }

        let (surrogate_low, surrogate_high) = SURROGATES;
        merged
            .into_iter()
            .flat_map(|(low, high)| {
                let below = (low < surrogate_low).then(|| (low, high.min(surrogate_low - 1)));
                let above = (high > surrogate_high).then(|| (low.max(surrogate_high + 1), high));
                below.into_iter().chain(above)
            })
            .collect()
    }

    /// The integral domain over positions in the code point ranges.
    fn indices(&self) -> (IntegralArbitrary<i128>, CharTable) {
        let table = CharTable::new(self.code_points());
        let target = table.index_of(' ').unwrap_or(0);
        let indices = IntegralArbitrary::spanning(0, table.count as i128 - 1, Some(target));
        (indices, table)
    }
}

/// Lookup from a position to a character across ranges.
#[derive(Debug, Clone)]
struct CharTable {
    ranges: Arc<Vec<(u32, u32)>>,
    count: u64,
}

impl CharTable {
    fn new(ranges: Vec<(u32, u32)>) -> Self {
        let count = ranges
            .iter()
            .map(|&(low, high)| u64::from(high - low) + 1)
            .sum();
        CharTable {
            ranges: Arc::new(ranges),
            count,
        }
    }

    fn char_at(&self, index: i128) -> char {
        let mut remaining = index as u64;
        for &(low, high) in self.ranges.iter() {
            let len = u64::from(high - low) + 1;
            if remaining < len {
                return char::from_u32(low + remaining as u32).unwrap_or(char::REPLACEMENT_CHARACTER);
            }
            remaining -= len;
        }
        char::REPLACEMENT_CHARACTER
    }

    fn index_of(&self, c: char) -> Option<i128> {
        let code = c as u32;
        let mut offset: u64 = 0;
        for &(low, high) in self.ranges.iter() {
            if (low..=high).contains(&code) {
                return Some((offset + u64::from(code - low)) as i128);
            }
            offset += u64::from(high - low) + 1;
        }
        None
    }
}

impl Arbitrary for CharArbitrary {
    type Value = char;

    fn generator(&self, size: Size) -> RandomGenerator<char> {
        let (indices, table) = self.indices();
        indices
            .generator(size)
            .map(move |index| table.char_at(index))
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<char>> {
        let (indices, table) = self.indices();
        indices
            .exhaustive(max_samples)
            .map(|exhaustive| exhaustive.map(move |index| table.char_at(index)))
    }

    fn edge_cases(&self) -> EdgeCases<char> {
        let (indices, table) = self.indices();
        indices
            .edge_cases()
            .map(move |index| table.char_at(index))
    }
}

/// Strings whose characters come from a [`CharArbitrary`].
pub struct StringArbitrary {
    chars: CharArbitrary,
    min_length: usize,
    max_length: usize,
}

impl Default for StringArbitrary {
    fn default() -> Self {
        Self::new()
    }
}

impl StringArbitrary {
    pub fn new() -> Self {
        StringArbitrary {
            chars: CharArbitrary::new(),
            min_length: 0,
            max_length: DEFAULT_MAX_SIZE,
        }
    }

    pub fn with_char_range(mut self, min: char, max: char) -> Result<Self> {
        self.chars = self.chars.range(min, max)?;
        Ok(self)
    }

    pub fn with_chars(mut self, chars: impl IntoIterator<Item = char>) -> Self {
        self.chars = self.chars.with_chars(chars);
        self
    }

    pub fn alpha(mut self) -> Self {
        self.chars = self.chars.alpha();
        self
    }

    pub fn numeric(mut self) -> Self {
        self.chars = self.chars.numeric();
        self
    }

    pub fn ascii(mut self) -> Self {
        self.chars = self.chars.ascii();
        self
    }

    pub fn of_length(self, length: usize) -> Self {
        StringArbitrary {
            min_length: length,
            max_length: length,
            ..self
        }
    }

    pub fn of_min_length(self, min_length: usize) -> Result<Self> {
        let max_length = self.max_length.max(min_length);
        self.with_lengths(min_length, max_length)
    }

    pub fn of_max_length(self, max_length: usize) -> Result<Self> {
        let min_length = self.min_length;
        self.with_lengths(min_length, max_length)
    }

    fn with_lengths(self, min_length: usize, max_length: usize) -> Result<Self> {
        if min_length > max_length {
            return Err(FalsifyError::invalid_arbitrary(format!(
                "min length {min_length} must not be greater than max length {max_length}"
            )));
        }
        Ok(StringArbitrary {
            min_length,
            max_length,
            ..self
        })
    }

    fn lists(&self) -> ListArbitrary<CharArbitrary> {
        ListArbitrary {
            element: self.chars.clone(),
            min_size: self.min_length,
            max_size: self.max_length,
        }
    }
}

fn collect_string(chars: Vec<char>) -> String {
    chars.into_iter().collect()
}

impl Arbitrary for StringArbitrary {
    type Value = String;

    fn generator(&self, size: Size) -> RandomGenerator<String> {
        self.lists().generator(size).map(collect_string)
    }

    fn exhaustive(&self, max_samples: u64) -> Option<ExhaustiveGenerator<String>> {
        self.lists()
            .exhaustive(max_samples)
            .map(|exhaustive| exhaustive.map(collect_string))
    }

    fn edge_cases(&self) -> EdgeCases<String> {
        self.lists().edge_cases().map(collect_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_points_skip_surrogates() {
        let all = CharArbitrary::new().code_points();
        assert_eq!(all, vec![(0, 0xD7FF), (0xE000, 0x10FFFF)]);
    }

    #[test]
    fn test_ranges_are_merged() {
        let chars = CharArbitrary::new()
            .range('a', 'f')
            .unwrap()
            .range('d', 'k')
            .unwrap()
            .with_chars(['z']);
        assert_eq!(
            chars.code_points(),
            vec![('a' as u32, 'k' as u32), ('z' as u32, 'z' as u32)]
        );
        assert!(CharArbitrary::new().range('z', 'a').is_err());
    }

    #[test]
    fn test_alpha_chars() {
        let generator = CharArbitrary::new().alpha().generator(Size::new(100));
        let mut random = Random::from_u64(12);
        for _ in 0..500 {
            let c = *generator.next(&mut random).unwrap().value();
            assert!(c.is_ascii_alphabetic(), "{c:?}");
        }
    }

    #[test]
    fn test_shrinks_towards_space_when_included() {
        let chars = CharArbitrary::new().ascii();
        let generator = chars.generator(Size::new(100));
        let mut random = Random::from_u64(5);
        for _ in 0..50 {
            let shrinkable = generator.next(&mut random).unwrap();
            if *shrinkable.value() != ' ' {
                assert_eq!(*shrinkable.shrink()[0].value(), ' ');
            }
        }
        let numeric = CharArbitrary::new().numeric().generator(Size::new(100));
        let shrinkable = numeric.next(&mut random).unwrap();
        if *shrinkable.value() != '0' {
            assert_eq!(*shrinkable.shrink()[0].value(), '0');
        }
    }

    #[test]
    fn test_exhaustive_chars() {
        let chars = CharArbitrary::new().with_chars(['c', 'a', 'b']);
        let all: String = chars.exhaustive(3).unwrap().iter().collect();
        assert_eq!(all, "abc");
        assert!(CharArbitrary::new().exhaustive(1000).is_none());
    }

    #[test]
    fn test_string_lengths() {
        let strings = StringArbitrary::new()
            .alpha()
            .of_min_length(1)
            .unwrap()
            .of_max_length(4)
            .unwrap();
        let generator = strings.generator(Size::new(100));
        let mut random = Random::from_u64(77);
        for _ in 0..200 {
            let s = generator.next(&mut random).unwrap().into_value();
            assert!((1..=4).contains(&s.chars().count()), "{s:?}");
            assert!(s.chars().all(|c| c.is_ascii_alphabetic()));
        }
        assert!(StringArbitrary::new()
            .of_min_length(5)
            .unwrap()
            .of_max_length(2)
            .is_err());
    }

    #[test]
    fn test_exhaustive_strings() {
        let strings = StringArbitrary::new()
            .with_chars(['x', 'y'])
            .of_max_length(2)
            .unwrap();
        let all: Vec<String> = strings.exhaustive(10).unwrap().iter().collect();
        assert_eq!(all, vec!["", "x", "y", "xx", "xy", "yx", "yy"]);
    }

    #[test]
    fn test_string_edge_cases() {
        let strings = StringArbitrary::new().with_chars(['q', 'r', 's']);
        assert_eq!(strings.edge_cases().values(), vec!["", "q", "r", "s"]);
    }
}
