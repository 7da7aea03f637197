use freccette_types::TurnResult;

/// Result of applying one turn to a player's score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredTurn {
    pub result: TurnResult,
    pub new_score: u32,
    pub recorded_points: u32, // Appended to history, 0 on a bust
}

pub struct ScoringRules;

impl ScoringRules {
    /// Apply the bust rule: a turn that would push the score past the target
    /// is forfeited, while landing exactly on the target wins.
    pub fn evaluate(current_score: u32, points: u32, target_score: u32) -> ScoredTurn {
        let projected = current_score.checked_add(points);

        match projected {
            Some(projected) if projected <= target_score => {
                let result = if projected == target_score {
                    TurnResult::Win
                } else {
                    TurnResult::Scored
                };
                ScoredTurn {
                    result,
                    new_score: projected,
                    recorded_points: points,
                }
            }
            // Overflow is treated the same as going over the target
            _ => ScoredTurn {
                result: TurnResult::Bust,
                new_score: current_score,
                recorded_points: 0,
            },
        }
    }
}
