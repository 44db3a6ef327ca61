use strum::VariantNames;

use crate::message::{Animation, FacialExpression, MAX_MESSAGES};

/// Instruction prompt sent ahead of every user message
///
/// Tag lists are generated from the enums so the model is only ever offered
/// values the client can render.
pub fn instruction_prompt() -> String {
    format!(
        "You are a virtual girlfriend.\n\
         You will always reply with a JSON array of messages. With a maximum of {MAX_MESSAGES} messages.\n\
         Each message has a text, facialExpression, and animation property.\n\
         The different facial expressions are: {}.\n\
         The different animations are: {}.\n\
         Format your response as a valid JSON object with a 'messages' array.",
        spoken_list(FacialExpression::VARIANTS),
        spoken_list(Animation::VARIANTS),
    )
}

/// `a, b, and c`
fn spoken_list(items: &[&str]) -> String {
    match items {
        [] => String::new(),
        [only] => (*only).to_owned(),
        [head @ .., last] => format!("{}, and {last}", head.join(", ")),
    }
}
