//! Column definitions, cell formatting and page-local sorting.

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::swapi::{DROID_GENDER, Person};

const DATE_FORMAT: &str = "%d/%m/%Y";
const INVALID_DATE: &str = "Invalid Date";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    BirthYear,
    EyeColor,
    Gender,
    HairColor,
    SkinColor,
    Height,
    Mass,
    Created,
    Edited,
    Icon,
}

impl Column {
    pub const ALL: [Self; 11] = [
        Self::Name,
        Self::BirthYear,
        Self::EyeColor,
        Self::Gender,
        Self::HairColor,
        Self::SkinColor,
        Self::Height,
        Self::Mass,
        Self::Created,
        Self::Edited,
        Self::Icon,
    ];

    pub const fn header(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::BirthYear => "Birth Year",
            Self::EyeColor => "Eye Color",
            Self::Gender => "Gender",
            Self::HairColor => "Hair Color",
            Self::SkinColor => "Skin Color",
            Self::Height => "Height",
            Self::Mass => "Mass",
            Self::Created => "Created",
            Self::Edited => "Edited",
            Self::Icon => "Icon",
        }
    }

    /// Text shown in the cell for `person`.
    pub fn display(self, person: &Person) -> String {
        match self {
            Self::Name => person.name.clone(),
            Self::BirthYear => person.birth_year.clone(),
            Self::EyeColor => person.eye_color.clone(),
            Self::Gender => person.gender.clone(),
            Self::HairColor => person.hair_color.clone(),
            Self::SkinColor => person.skin_color.clone(),
            Self::Height => person.height.clone(),
            Self::Mass => person.mass.clone(),
            Self::Created => format_date(&person.created),
            Self::Edited => format_date(&person.edited),
            Self::Icon => GenderIcon::for_gender(&person.gender).glyph().to_string(),
        }
    }

    /// Order two records by this column.
    pub fn compare(self, a: &Person, b: &Person) -> Ordering {
        match self {
            Self::Name => alphanumeric(&a.name, &b.name),
            Self::BirthYear => alphanumeric(&a.birth_year, &b.birth_year),
            Self::EyeColor => alphanumeric(&a.eye_color, &b.eye_color),
            Self::Gender => alphanumeric(&a.gender, &b.gender),
            Self::HairColor => alphanumeric(&a.hair_color, &b.hair_color),
            Self::SkinColor => alphanumeric(&a.skin_color, &b.skin_color),
            Self::Height => alphanumeric(&a.height, &b.height),
            Self::Mass => alphanumeric(&a.mass, &b.mass),
            Self::Created => parse_date(&a.created).cmp(&parse_date(&b.created)),
            Self::Edited => parse_date(&a.edited).cmp(&parse_date(&b.edited)),
            Self::Icon => GenderIcon::for_gender(&a.gender).cmp(&GenderIcon::for_gender(&b.gender)),
        }
    }
}

/// Glyph shown in the icon column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GenderIcon {
    Droid,
    Person,
    Unknown,
}

impl GenderIcon {
    pub fn for_gender(gender: &str) -> Self {
        match gender {
            DROID_GENDER => Self::Droid,
            "male" | "female" => Self::Person,
            _ => Self::Unknown,
        }
    }

    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Droid => "🤖",
            Self::Person => "👤",
            Self::Unknown => "❓",
        }
    }
}

/// Calendar date of a timestamp, as written in the source string.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(datetime.date());
    }
    if let Ok(datetime) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Some(datetime.date());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn format_date(value: &str) -> String {
    parse_date(value).map_or_else(
        || INVALID_DATE.to_string(),
        |date| date.format(DATE_FORMAT).to_string(),
    )
}

/// Compare strings so that runs of digits order numerically.
///
/// `"96" < "172"` and `"19BBY" < "112BBY"`, while plain words compare
/// case-insensitively.
pub fn alphanumeric(a: &str, b: &str) -> Ordering {
    let mut left = chunks(a);
    let mut right = chunks(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return a.cmp(b),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ordering = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    _ => l.to_lowercase().cmp(&r.to_lowercase()),
                };
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
        }
    }
}

/// Split into alternating runs of digits and non-digits.
fn chunks(value: &str) -> impl Iterator<Item = &str> {
    let mut rest = value;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let digit = first.is_ascii_digit();
        let end = rest
            .find(|c: char| c.is_ascii_digit() != digit)
            .unwrap_or(rest.len());
        let (chunk, tail) = rest.split_at(end);
        rest = tail;
        Some(chunk)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub const fn arrow(self) -> &'static str {
        match self {
            Self::Ascending => "▲",
            Self::Descending => "▼",
        }
    }
}

/// Sort applied to the loaded page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    sorted_by: Option<(Column, SortDirection)>,
}

impl SortState {
    pub const fn sorted_by(&self) -> Option<(Column, SortDirection)> {
        self.sorted_by
    }

    pub fn direction_of(&self, column: Column) -> Option<SortDirection> {
        self.sorted_by
            .filter(|(sorted, _)| *sorted == column)
            .map(|(_, direction)| direction)
    }

    /// Cycle `column` through ascending, descending and unsorted.
    ///
    /// Toggling a different column starts it at ascending.
    pub fn toggle(&mut self, column: Column) {
        self.sorted_by = match self.direction_of(column) {
            None => Some((column, SortDirection::Ascending)),
            Some(SortDirection::Ascending) => Some((column, SortDirection::Descending)),
            Some(SortDirection::Descending) => None,
        };
    }

    /// Row order for `people`, as indices into the slice.
    pub fn order(&self, people: &[Person]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..people.len()).collect();
        if let Some((column, direction)) = self.sorted_by {
            indices.sort_by(|&a, &b| {
                let ordering = column.compare(&people[a], &people[b]);
                match direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        indices
    }
}
