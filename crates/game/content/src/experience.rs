//! The canonical experience table.
//!
//! Ninety-nine rows mapping each level to the cumulative experience
//! required to hold it. Values are strictly increasing in both fields and
//! there is no row beyond the level cap; progression treats level 99 as
//! terminal.

use game_core::{ExperienceRow, ExperienceTable};

const fn row(level: u8, experience: u64) -> ExperienceRow {
    ExperienceRow { level, experience }
}

/// Cumulative experience thresholds for levels 1..=99.
pub const EXPERIENCE_TABLE: [ExperienceRow; 99] = [
    row(1, 0),
    row(2, 300),
    row(3, 750),
    row(4, 1500),
    row(5, 2800),
    row(6, 4500),
    row(7, 7000),
    row(8, 10500),
    row(9, 15000),
    row(10, 21000),
    row(11, 28500),
    row(12, 37500),
    row(13, 48000),
    row(14, 60000),
    row(15, 75000),
    row(16, 93000),
    row(17, 114000),
    row(18, 138000),
    row(19, 165000),
    row(20, 195000),
    row(21, 228000),
    row(22, 264000),
    row(23, 303000),
    row(24, 345000),
    row(25, 390000),
    row(26, 438000),
    row(27, 489000),
    row(28, 543000),
    row(29, 600000),
    row(30, 660000),
    row(31, 723000),
    row(32, 789000),
    row(33, 858000),
    row(34, 930000),
    row(35, 1005000),
    row(36, 1083000),
    row(37, 1164000),
    row(38, 1248000),
    row(39, 1335000),
    row(40, 1425000),
    row(41, 1518000),
    row(42, 1614000),
    row(43, 1713000),
    row(44, 1815000),
    row(45, 1920000),
    row(46, 2028000),
    row(47, 2139000),
    row(48, 2253000),
    row(49, 2370000),
    row(50, 2490000),
    row(51, 2613000),
    row(52, 2739000),
    row(53, 2868000),
    row(54, 3000000),
    row(55, 3135000),
    row(56, 3273000),
    row(57, 3414000),
    row(58, 3558000),
    row(59, 3705000),
    row(60, 3855000),
    row(61, 4008000),
    row(62, 4164000),
    row(63, 4323000),
    row(64, 4485000),
    row(65, 4650000),
    row(66, 4818000),
    row(67, 4989000),
    row(68, 5163000),
    row(69, 5340000),
    row(70, 5520000),
    row(71, 5703000),
    row(72, 5889000),
    row(73, 6078000),
    row(74, 6270000),
    row(75, 6465000),
    row(76, 6663000),
    row(77, 6864000),
    row(78, 7068000),
    row(79, 7275000),
    row(80, 7485000),
    row(81, 7698000),
    row(82, 7914000),
    row(83, 8133000),
    row(84, 8355000),
    row(85, 8580000),
    row(86, 8808000),
    row(87, 9039000),
    row(88, 9273000),
    row(89, 9510000),
    row(90, 9750000),
    row(91, 9993000),
    row(92, 10239000),
    row(93, 10488000),
    row(94, 10740000),
    row(95, 10995000),
    row(96, 11253000),
    row(97, 11514000),
    row(98, 11778000),
    row(99, 12045000),
];

/// Borrowed table view for the progression engine.
pub fn experience_table() -> ExperienceTable<'static> {
    ExperienceTable::new(&EXPERIENCE_TABLE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_strictly_increasing_in_both_fields() {
        for pair in EXPERIENCE_TABLE.windows(2) {
            assert!(pair[1].level == pair[0].level + 1);
            assert!(pair[1].experience > pair[0].experience);
        }
    }

    #[test]
    fn table_spans_exactly_the_level_range() {
        assert_eq!(EXPERIENCE_TABLE.first().unwrap().level, 1);
        assert_eq!(EXPERIENCE_TABLE.first().unwrap().experience, 0);
        assert_eq!(EXPERIENCE_TABLE.last().unwrap().level, 99);
        assert_eq!(EXPERIENCE_TABLE.last().unwrap().experience, 12_045_000);
    }

    #[test]
    fn lookup_matches_known_thresholds() {
        let table = experience_table();
        assert_eq!(table.level_for(0), Some(1));
        assert_eq!(table.level_for(299), Some(1));
        assert_eq!(table.level_for(300), Some(2));
        assert_eq!(table.level_for(750), Some(3));
        assert_eq!(table.level_for(u64::MAX), Some(99));
    }
}
