use crate::domain::{ScoreLine, SetScore};
use crate::errors::ValidationError;

const REGULAR_FIELDS: usize = 4;
const SUPER_TIEBREAK_FIELDS: usize = 6;
const SETS_TO_WIN: u32 = 2;

/// Turn raw form fields into numbers. Blank or non-numeric fields are rejected.
pub fn parse_scores<S: AsRef<str>>(raw: &[S]) -> Result<Vec<u32>, ValidationError> {
    raw.iter()
        .map(|field| {
            let field = field.as_ref().trim();
            if field.is_empty() {
                return Err(ValidationError::IncompleteOrNonNumeric);
            }
            field
                .parse::<u32>()
                .map_err(|_| ValidationError::IncompleteOrNonNumeric)
        })
        .collect()
}

/// Check a best-of-three scoreline.
///
/// Scores come in side-A/side-B pairs per set: four values for two sets, six
/// when a super tie-break was played. Without a super tie-break a trailing
/// `0, 0` pair is tolerated and dropped, matching an untouched third-set field.
pub fn validate(scores: &[u32], super_tiebreak: bool) -> Result<ScoreLine, ValidationError> {
    let used = fields_in_play(scores, super_tiebreak)?;

    let sets: Vec<SetScore> = used
        .chunks_exact(2)
        .map(|pair| SetScore::new(pair[0], pair[1]))
        .collect();

    let line = ScoreLine {
        sets,
        super_tiebreak,
    };

    let (won_a, won_b) = line.sets_won();
    if (won_a == SETS_TO_WIN) == (won_b == SETS_TO_WIN) {
        return Err(ValidationError::InvalidScoreline);
    }

    Ok(line)
}

/// [`parse_scores`] followed by [`validate`]
pub fn validate_raw<S: AsRef<str>>(
    raw: &[S],
    super_tiebreak: bool,
) -> Result<ScoreLine, ValidationError> {
    let scores = parse_scores(raw)?;
    validate(&scores, super_tiebreak)
}

fn fields_in_play(scores: &[u32], super_tiebreak: bool) -> Result<&[u32], ValidationError> {
    match (scores.len(), super_tiebreak) {
        (SUPER_TIEBREAK_FIELDS, true) | (REGULAR_FIELDS, false) => Ok(scores),
        (SUPER_TIEBREAK_FIELDS, false) if scores[4..] == [0, 0] => Ok(&scores[..REGULAR_FIELDS]),
        _ => Err(ValidationError::IncompleteOrNonNumeric),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{encoding, Outcome};

    fn result_and_details(line: ScoreLine) -> (String, String) {
        let outcome = Outcome::Played(line);
        (outcome.result(), outcome.details())
    }

    #[test]
    fn test_straight_sets() {
        let line = validate(&[6, 0, 6, 0], false).unwrap();
        assert_eq!(
            result_and_details(line),
            ("2x0".to_string(), "6x0, 6x0".to_string())
        );
    }

    #[test]
    fn test_super_tiebreak_decider() {
        let line = validate(&[6, 7, 7, 6, 10, 8], true).unwrap();
        assert_eq!(
            result_and_details(line),
            ("2x1".to_string(), "6x7, 7x6, 10x8 (STB)".to_string())
        );
    }

    #[test]
    fn test_side_b_wins() {
        let line = validate(&[3, 6, 4, 6], false).unwrap();
        assert_eq!(line.sets_won(), (0, 2));
    }

    #[test]
    fn test_no_side_reaches_two_sets() {
        assert_eq!(
            validate(&[1, 1, 1, 1], false),
            Err(ValidationError::InvalidScoreline)
        );
        assert_eq!(
            validate(&[6, 4, 4, 6], false),
            Err(ValidationError::InvalidScoreline)
        );
        assert_eq!(
            validate(&[0, 0, 0, 0, 0, 0], true),
            Err(ValidationError::InvalidScoreline)
        );
    }

    #[test]
    fn test_level_super_tiebreak_leaves_split_sets() {
        assert_eq!(
            validate(&[6, 4, 4, 6, 10, 10], true),
            Err(ValidationError::InvalidScoreline)
        );
    }

    #[test]
    fn test_wrong_field_count() {
        assert_eq!(
            validate(&[6, 0, 6], false),
            Err(ValidationError::IncompleteOrNonNumeric)
        );
        assert_eq!(
            validate(&[6, 0, 6, 0], true),
            Err(ValidationError::IncompleteOrNonNumeric)
        );
        assert_eq!(
            validate(&[6, 4, 4, 6, 10, 8], false),
            Err(ValidationError::IncompleteOrNonNumeric)
        );
    }

    #[test]
    fn test_untouched_third_pair_is_dropped() {
        let line = validate(&[7, 5, 6, 3, 0, 0], false).unwrap();
        assert_eq!(line.sets.len(), 2);
        assert_eq!(encoding::format_details(&line), "7x5, 6x3");
    }

    #[test]
    fn test_split_sets_with_untouched_third_pair() {
        assert_eq!(
            validate(&[7, 6, 4, 6, 0, 0], false),
            Err(ValidationError::InvalidScoreline)
        );
    }

    #[test]
    fn test_raw_fields() {
        assert!(validate_raw(&["6", " 2 ", "6", "1"], false).is_ok());
        assert_eq!(
            validate_raw(&["6", "", "6", "1"], false),
            Err(ValidationError::IncompleteOrNonNumeric)
        );
        assert_eq!(
            validate_raw(&["6", "two", "6", "1"], false),
            Err(ValidationError::IncompleteOrNonNumeric)
        );
        assert_eq!(
            validate_raw(&["6", "-2", "6", "1"], false),
            Err(ValidationError::IncompleteOrNonNumeric)
        );
    }

    #[test]
    fn test_same_input_same_output() {
        let first = validate(&[4, 6, 6, 3, 10, 7], true);
        let second = validate(&[4, 6, 6, 3, 10, 7], true);
        assert_eq!(first, second);
    }
}
