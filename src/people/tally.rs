use crate::swapi::PeoplePage;

/// Counts shown in the summary cards.
///
/// `droid_count` and `human_count` only cover the records of the loaded
/// page, while `total_count` is the server-side total for the query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total_count: u64,
    pub droid_count: usize,
    pub human_count: usize,
}

impl Tally {
    pub fn from_page(page: &PeoplePage) -> Self {
        let droid_count = page.results.iter().filter(|p| p.is_droid()).count();
        Self {
            total_count: page.count,
            droid_count,
            human_count: page.results.len() - droid_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::people::testing::person;

    #[test]
    fn test_tally_partitions_page() {
        let page = PeoplePage {
            count: 82,
            results: vec![
                person("Luke Skywalker", "male"),
                person("C-3PO", "n/a"),
                person("R2-D2", "n/a"),
                person("Leia Organa", "female"),
                person("Jabba Desilijic Tiure", "hermaphrodite"),
                person("Nameless", ""),
            ],
        };

        let tally = Tally::from_page(&page);
        assert_eq!(tally.total_count, 82);
        assert_eq!(tally.droid_count, 2);
        assert_eq!(tally.human_count, 4);
        assert_eq!(tally.droid_count + tally.human_count, page.results.len());
    }

    #[test]
    fn test_tally_single_match() {
        let page = PeoplePage {
            count: 1,
            results: vec![person("Luke Skywalker", "male")],
        };
        let tally = Tally::from_page(&page);
        assert_eq!(
            tally,
            Tally {
                total_count: 1,
                droid_count: 0,
                human_count: 1,
            }
        );
    }

    #[test]
    fn test_tally_empty_page() {
        let tally = Tally::from_page(&PeoplePage::default());
        assert_eq!(tally, Tally::default());
    }

    #[test]
    fn test_droid_sentinel_is_case_sensitive() {
        let page = PeoplePage {
            count: 1,
            results: vec![person("Odd", "N/A")],
        };
        assert_eq!(Tally::from_page(&page).human_count, 1);
    }
}
