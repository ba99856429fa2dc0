/// Display label for a 1-indexed rank: "Primary", "Secondary", "Tertiary",
/// then "4th", "21st", "112th" and so on.
pub fn order_label(rank: usize) -> String {
    match rank {
        1 => return "Primary".to_string(),
        2 => return "Secondary".to_string(),
        3 => return "Tertiary".to_string(),
        _ => {}
    }
    let suffix = match (rank % 10, rank % 100) {
        (1, tens) if tens != 11 => "st",
        (2, tens) if tens != 12 => "nd",
        (3, tens) if tens != 13 => "rd",
        _ => "th",
    };
    format!("{rank}{suffix}")
}

#[test]
fn test() {
    let labels = [
        (1, "Primary"),
        (2, "Secondary"),
        (3, "Tertiary"),
        (4, "4th"),
        (10, "10th"),
        (11, "11th"),
        (12, "12th"),
        (13, "13th"),
        (21, "21st"),
        (22, "22nd"),
        (23, "23rd"),
        (100, "100th"),
        (101, "101st"),
        (111, "111th"),
        (112, "112th"),
        (1003, "1003rd"),
    ];
    for (rank, label) in labels {
        assert_eq!(order_label(rank), label, "rank {rank}");
    }
}
