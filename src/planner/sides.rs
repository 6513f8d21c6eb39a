/// Parse the free-text sides field: comma separated, trimmed, empties dropped.
pub fn parse_sides(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Editable form of a stored sides list.
pub fn join_sides(sides: &[String]) -> String {
    sides.join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sides_trims_and_drops_empty() {
        assert_eq!(parse_sides("Chips, Fruit,  ,Juice"), vec!["Chips", "Fruit", "Juice"]);
    }

    #[test]
    fn test_parse_sides_empty_input() {
        assert!(parse_sides("").is_empty());
        assert!(parse_sides(" , ,, ").is_empty());
    }

    #[test]
    fn test_parse_sides_keeps_inner_whitespace_and_duplicates() {
        assert_eq!(
            parse_sides("\tpotato salad ,\ncarrot sticks, Fruit,Fruit"),
            vec!["potato salad", "carrot sticks", "Fruit", "Fruit"]
        );
    }

    #[test]
    fn test_join_then_parse_preserves_content() {
        let sides = parse_sides("Chips,Fruit ,  Juice");
        assert_eq!(join_sides(&sides), "Chips, Fruit, Juice");
        assert_eq!(parse_sides(&join_sides(&sides)), sides);
    }
}
