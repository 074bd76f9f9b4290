//! Classification prompt template.

use std::fmt::Write;

use crate::models::IntentCatalog;

/// Build the labelling prompt for `utterance` over the catalog's intents.
///
/// Each intent contributes at most two examples.
pub fn build_prompt(utterance: &str, catalog: &IntentCatalog) -> String {
    let mut prompt = String::from(
        "I am going to give you a list of labels (intents). Each label has two example utterances.\n\n",
    );

    for intent in catalog.iter() {
        let _ = writeln!(prompt, "{}:", intent.label);
        for (ordinal, example) in ["one", "two"].iter().zip(&intent.examples) {
            let _ = writeln!(prompt, "Example {}: \"{}\"", ordinal, example);
        }
        prompt.push('\n');
    }

    prompt.push_str(
        "Then, I will give you an utterance. Label it with an intent from the above list.\n",
    );
    prompt.push_str("Reply in the format: \"utterance == label\". Do not include extra information.\n\n");
    let _ = write!(prompt, "Utterance: \"{}\"", utterance);

    prompt
}
