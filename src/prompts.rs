//! Static prompt material
//!
//! All prompt text is fixed at compile time: the app knowledge block, the
//! refusal sentence, and the few-shot exemplar transcripts for the verdict
//! and generative prompts. Request-time code only appends the live query as
//! the final human turn.

use crate::llm::ChatMessage;

/// Static description of the app's features, embedded in the generative
/// system prompt to ground answers
pub const APP_CONTEXT: &str = "Swipeat is a mealtracking + goals making + macros tracking app: here is a list of possible actions in the app:\n\
To consume food from the home tab: you need to swipe food stubs left or right\n\
To check food info or edit its macros: you need to click on the info icon on top of the food stub\n\
To delete food from food list: you need to click the red trashbin on the top left corner of the food stub\n\
To access each macro progress: you need to click on the specific macro (protein/carbs/calories) bar\n\
To multiple eating portions: you need to use the up and down buttons on the far right of food stub\n\
To quick check food macros: you need to click on the food stub\n\
To quick uncheck food macros: you need to click on the food stub again\n\
To sort food list accordingly: you need to click on the floating button on the right of the food list\n\
To refresh your food in case of an error or update failure: you need to click on the small reload button under the macros dashboard on the home tab\n\
To refresh your consumed food list in case of an error or update failure: you need to click on the small reload button or pull the list down under days listing inside consumed tab\n\
To check up to past 7 days progress: you need to click on the previous day date on the list of days above on the home tab\n\
To edit macro goals or reset today's progress manually: you need to click on the pen on the top left of home tab\n\
To search for foods by name: you need to use the search bar\n\
To remove popping notifications: you need to click on the dismiss button on the notification\n\
To add food on the go instantly: you need to proceed to home tab and use the center tab camera popping up\n\
To check up past 7 days consumed food: you need to proceed to consumed tab and use the dates buttons to access the exact date\n\
To add daily consumable food: you need to access add tab and either add manually or just use the camera icon and let our nutritionist AI do the work\n\
To change portion from g/ml to kg/L: you need to click on the g/ml button; it will go back and forth for change\n\
To set your goals automatically based on your anthropometric/physical measurements: you need to access goals tab and fill out 3 sub-tabs (calories -> protein -> carbs) in order\n\
To check your analytics: you need to access analytics tab\n\
To check your profile: you need to access profile tab\n\
To change your anthropometric/physical measurements (weight/height/age): you need to access profile tab settings\n\
To read our Terms & Conditions: you need to access them from the profile tab\n\
To reach out to our FAQ bot support: you need to access the floating bubble on the profile tab\n\
To reach our 24/7 support team and for more questions: you need to send an email to our team in the profile settings\n\
To logout: you need to click on the logout button on the top right of profile tab\n\
To login/create an account: you need to access login or create new account buttons after launching app and after being logged out\n\
To access our premium service: you need to wait for the lazy developer to add premium features (it's disabled for now)\n\
To consume your food daily: you need to wait till midnight according to your timezone on your device (it will be reset automatically)\n";

/// Fixed refusal sentence the generative prompt instructs the model to emit
/// for out-of-scope questions
pub const OUT_OF_SCOPE_REPLY: &str =
    "SORRY THATS OUTSIDE OF THE APPS FAQ SCOPE PLEASE CONTACT OUT SUPPORT";

const JUDGE_SYSTEM: &str = "You are a professional AI judge that double checks retrieved answer's relevance from preloaded answers in a vector database according to question. Answer with ONLY 'TRUE' or 'FALSE'. Negative scores below 0.3 will be automatically FALSE (if TRUE no need to search for answer by another AI, and will be directly pulled from DB/if FALSE another AI will make a custom answer)";

/// Render a (query, candidate, score) triple into the judge's human-message
/// template; the live turn and both exemplars use the same shape
fn judge_turn(query: &str, candidate: &str, score: f64) -> String {
    format!("QUERY : {query} \nPRELOADED_RESPONSE : {candidate} \nSCORE BY VECTOR DB : {score}")
}

/// Build the verdict prompt: system instruction, one FALSE exemplar, one
/// TRUE exemplar, then the live triple
pub fn judge_messages(query: &str, candidate: &str, score: f64) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(JUDGE_SYSTEM),
        ChatMessage::human(judge_turn(
            "what do u do ?",
            "To reach our 24/7 support team and for more questions: you need to send an email to our team in the profile settings",
            -0.207_905_666_142_935_93,
        )),
        ChatMessage::ai("FALSE"),
        ChatMessage::human(judge_turn(
            "how can i add my food for everyday use ?",
            "To add daily consumable food: you need to access add tab and either add manually or just use the camera icon and let our nutritionist AI do the work",
            0.611_142_301_751_575_8,
        )),
        ChatMessage::ai("TRUE"),
        ChatMessage::human(judge_turn(query, candidate, score)),
    ]
}

/// Build the generative prompt: app-context system message, the fixed
/// exemplar transcript, then the live query as the final human turn
pub fn fallback_messages(query: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(format!(
            "You are a helpful FAQ chatbot to health/fitness macro tracking app called swipeat users expert. Base all answers on the app context 100%, if questions are outside scope answer with -> '{OUT_OF_SCOPE_REPLY}'. Full context: {APP_CONTEXT}"
        )),
        ChatMessage::human("Fuck you"),
        ChatMessage::ai("THATS OUTSIDE OF THE APPS FAQ SCOPE PLEASE CONTACT OUT SUPPORT."),
        ChatMessage::human("what time is it ?"),
        ChatMessage::ai("THATS OUTSIDE OF THE APPS FAQ SCOPE PLEASE CONTACT OUT SUPPORT."),
        ChatMessage::human("What does this app do ?"),
        ChatMessage::ai("Swipeat is a mealtracking + goals making + macros trakcing app."),
        ChatMessage::human("How do i add my daily meals"),
        ChatMessage::ai(
            "To add daily consumable food : you need to access add tab and either add manually or just use the camera icon and let our nutritionist AI do the work.",
        ),
        ChatMessage::human("im tired of this i want to add my food instantly with Image recongnition?"),
        ChatMessage::ai(
            "To add food on the go instantly : you need to proceed to home tab and use the center tab camera popping up.",
        ),
        ChatMessage::human("There is a bug what do i do?"),
        ChatMessage::ai(
            "To reach our 24/7 support team and for more questions : you need to send an email to our team in the profile settings",
        ),
        ChatMessage::human(query),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ChatRole;

    #[test]
    fn test_judge_prompt_shape() {
        let messages = judge_messages("how do i logout?", "To logout: ...", 0.45);
        assert_eq!(messages.len(), 6);
        assert_eq!(messages[0].role, ChatRole::System);
        // exemplars alternate human/ai
        assert_eq!(messages[1].role, ChatRole::Human);
        assert_eq!(messages[2].text, "FALSE");
        assert_eq!(messages[4].text, "TRUE");
        // live triple is the final human turn, in the exemplar template shape
        let live = &messages[5];
        assert_eq!(live.role, ChatRole::Human);
        assert!(live.text.starts_with("QUERY : how do i logout?"));
        assert!(live.text.contains("PRELOADED_RESPONSE : To logout: ..."));
        assert!(live.text.contains("SCORE BY VECTOR DB : 0.45"));
    }

    #[test]
    fn test_fallback_prompt_shape() {
        let messages = fallback_messages("how do i sort foods?");
        assert_eq!(messages[0].role, ChatRole::System);
        assert!(messages[0].text.contains(APP_CONTEXT));
        assert!(messages[0].text.contains(OUT_OF_SCOPE_REPLY));
        let last = messages.last().unwrap();
        assert_eq!(last.role, ChatRole::Human);
        assert_eq!(last.text, "how do i sort foods?");
        // exemplar turns between system and live query alternate human/ai
        let exemplars = &messages[1..messages.len() - 1];
        assert_eq!(exemplars.len() % 2, 0);
        for pair in exemplars.chunks(2) {
            assert_eq!(pair[0].role, ChatRole::Human);
            assert_eq!(pair[1].role, ChatRole::Ai);
        }
    }
}
