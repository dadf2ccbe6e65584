//! Phase prompt builder
//!
//! Pure functions from (role, phase, topic, sentence cap) to instruction
//! text. Every string is reproducible from its inputs alone, so a side's
//! system instruction can be re-derived identically on every rehydration
//! instead of being persisted alongside the history.

use rostrum_core::{Side, Winner};

/// The moderator's framing line that opens every debate.
pub fn moderator_framing(topic: &str) -> String {
    format!(
        "Debate topic: {}. Pro side will argue in favor, Con side will argue against. \
         I, the moderator will manage the debate.",
        topic
    )
}

/// A side's fixed system instruction: stance plus output length constraint.
pub fn stance_instruction(side: Side, topic: &str, max_sentences: u32) -> String {
    let stance = match side {
        Side::Pro => "You are on the pro side of a debate. Your goal is to argue for the topic.",
        Side::Con => {
            "You are on the con side of a debate. Your goal is to argue against the topic."
        }
    };
    format!(
        "{} {} Be logical and persuasive. Respond to the opposing side's arguments. \
         Only ever respond with {} sentences. Do not include any other information.",
        moderator_framing(topic),
        stance,
        max_sentences
    )
}

pub fn opening_statement(topic: &str) -> String {
    format!("Opening statement for the debate topic: {}", topic)
}

/// Prompt asking a side to answer the moderator's question from its stance.
pub fn question_prompt(side: Side, question: &str, max_sentences: u32) -> String {
    let direction = match side {
        Side::Pro => "in favour of",
        Side::Con => "in opposition to",
    };
    format!(
        "Respond to the question {}: {}. Provide your argument in {} sentences.",
        direction, question, max_sentences
    )
}

/// Prompt asking a side to rebut the opponent's just-produced argument.
///
/// The opponent's answer is embedded verbatim, which is why rebuttals can
/// only be generated after both answers exist.
pub fn rebuttal_prompt(opponent: Side, opponent_argument: &str, max_sentences: u32) -> String {
    format!(
        "Rebuttal to the {} side's argument: {}. Provide your rebuttal in {} sentences.",
        opponent.as_str(),
        opponent_argument,
        max_sentences
    )
}

pub fn closing_prompt(max_sentences: u32) -> String {
    format!(
        "Provide your closing argument for the debate in {} sentences.",
        max_sentences
    )
}

pub fn closing_framing() -> String {
    "We will now hear the closing arguments from both sides.".to_string()
}

pub fn judgment_narration() -> String {
    "We will now hear the final judgment on the debate.".to_string()
}

pub fn judgment_text(winner: Winner) -> String {
    format!("Judgment: The winner is {}.", winner.as_str())
}

pub fn judge_system_instruction() -> String {
    "You are a debate judge. Analyze the debate transcript and provide a final judgment \
     on who won the debate."
        .to_string()
}

/// The single-shot judge prompt with the full transcript embedded.
pub fn judge_prompt(topic: &str, transcript_json: &str) -> String {
    format!(
        "Based on the debate about {}, provide a final judgment on who won the debate. \
         Consider all arguments and rebuttals. Give one word answer: 'pro' or 'con'. \
         Here is the transcript of the debate: {}",
        topic, transcript_json
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompts_are_deterministic() {
        let a = stance_instruction(Side::Pro, "cats vs dogs", 2);
        let b = stance_instruction(Side::Pro, "cats vs dogs", 2);
        assert_eq!(a, b);
        assert!(a.contains("argue for the topic"));
        assert!(a.contains("2 sentences"));

        let con = stance_instruction(Side::Con, "cats vs dogs", 3);
        assert!(con.contains("argue against the topic"));
        assert!(con.contains("3 sentences"));
    }

    #[test]
    fn test_question_prompt_embeds_stance() {
        assert!(question_prompt(Side::Pro, "why?", 2).contains("in favour of: why?"));
        assert!(question_prompt(Side::Con, "why?", 2).contains("in opposition to: why?"));
    }

    #[test]
    fn test_rebuttal_prompt_embeds_opponent_argument() {
        let prompt = rebuttal_prompt(Side::Con, "coffee is better", 2);
        assert!(prompt.contains("con side's argument: coffee is better"));
    }
}
