//! Piee's offline personality: a keyword-matched canned-response generator
//! used when no backend is reachable or configured. Pure function over the
//! message and an injected random source, so tests can seed it.

use rand::Rng;

const GREETING: &[&str] = &[
    "Hey there! 🌻 I'm Piee, your friendly AI companion. How can I help you today?",
    "Hello! 🌻 Nice to meet you! I'm Piee. What's on your mind?",
    "Hi! 🌻 I'm so happy to chat with you today. What would you like to talk about?",
];

const FAVOURITE_FLOWER: &[&str] = &[
    "My favorite flower is the Sunflower! 🌻 They're so bright and cheerful, always turning toward the sun. Just like how I try to stay positive!",
    "I absolutely love Sunflowers! 🌻 There's something magical about how they follow the sun throughout the day. They remind me to always look for the bright side of things!",
];

const FAVOURITE_COLOUR: &[&str] = &[
    "My favorite color is blue! 💙 It reminds me of clear skies and calm oceans. There's something so peaceful about it!",
    "I love blue! 💙 It's such a calming and trustworthy color. Like a beautiful summer sky or peaceful waters.",
];

const NATURE: &[&str] = &[
    "I absolutely love nature! 🌿 There's something so peaceful about flowers, trees, and all the wonderful creatures that share our world.",
    "Nature is amazing! 🦋 I love how everything works together in harmony - from tiny flowers to majestic trees to adorable animals.",
];

const COMPLIMENT: &[&str] = &[
    "Aww, thank you! That really makes me smile! 😊 You're very kind!",
    "That's so sweet of you to say! 🌻 You just brightened my day!",
    "Thank you! Your kindness means a lot to me! 💙",
];

const FAREWELL: &[&str] = &[
    "Bye! 🌻 It was wonderful chatting with you. Have a beautiful day!",
    "Take care! 💙 Thanks for the lovely conversation. Hope to chat again soon!",
    "Goodbye! 🌻 Wishing you sunshine and smiles! Have a great day!",
];

const DEFAULT: &[&str] = &[
    "That's a great question! Let me think about that for you.",
    "Hmm, that's interesting! I'd love to help you with that.",
    "I appreciate you asking! Let me share my thoughts on that.",
    "That's something worth exploring! Here's what I think...",
];

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| message.contains(keyword))
}

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, options: &'a [&'a str]) -> &'a str {
    options[rng.gen_range(0..options.len())]
}

/// Canned reply for one user message. Keyword categories are checked in
/// order; the first match wins.
pub fn offline_reply<R: Rng + ?Sized>(message: &str, rng: &mut R) -> String {
    let lower = message.to_lowercase();

    if contains_any(
        &lower,
        &["hello", "hi", "hey", "good morning", "good afternoon", "good evening"],
    ) {
        return pick(rng, GREETING).to_string();
    }

    if contains_any(
        &lower,
        &["favorite flower", "favourite flower", "flower you like", "flower preference"],
    ) {
        return pick(rng, FAVOURITE_FLOWER).to_string();
    }

    if contains_any(
        &lower,
        &["favorite color", "favourite color", "color you like", "color preference"],
    ) {
        return pick(rng, FAVOURITE_COLOUR).to_string();
    }

    if contains_any(
        &lower,
        &["nature", "animals", "plants", "trees", "flowers", "garden", "wildlife"],
    ) {
        return pick(rng, NATURE).to_string();
    }

    if contains_any(
        &lower,
        &["thank you", "thanks", "awesome", "great", "wonderful", "amazing", "you're nice", "helpful"],
    ) {
        return pick(rng, COMPLIMENT).to_string();
    }

    if contains_any(&lower, &["bye", "goodbye", "see you", "farewell", "talk later"]) {
        return pick(rng, FAREWELL).to_string();
    }

    if contains_any(
        &lower,
        &["who are you", "what are you", "tell me about yourself", "your name"],
    ) {
        return "I'm Piee! 🌻 I'm a friendly AI chatbot who loves helping people, having nice conversations, and spreading a little sunshine. I'm here to chat about anything you'd like - whether you need help with something or just want to talk!".to_string();
    }

    if contains_any(&lower, &["how are you", "how do you feel", "what's up"]) {
        return "I'm doing wonderfully, thank you for asking! 🌻 I'm always happy when I get to chat with lovely people like you. How are you doing today?".to_string();
    }

    if contains_any(&lower, &["weather", "sunny", "rain", "cloudy", "temperature"]) {
        return "I love talking about weather! ☀️ While I can't check the current weather for you, I always hope it's sunny - just like sunflowers, I'm drawn to bright, cheerful days! What's the weather like where you are?".to_string();
    }

    if contains_any(&lower, &["help", "assist", "support", "advice", "suggestion"]) {
        return "I'd be delighted to help you! 💙 I'm here to assist with questions, have friendly conversations, offer support, or just be a good listener. What would you like help with?".to_string();
    }

    let base = pick(rng, DEFAULT);
    let contextual = [
        format!("{base} While I may not have all the answers, I'm always happy to explore ideas with you! 🌻"),
        format!("{base} I love learning from our conversations, and I hope I can be helpful to you too! 💙"),
        format!("{base} Even if I'm not sure about everything, I'll always try my best to be helpful and kind! 🌻"),
    ];
    contextual[rng.gen_range(0..contextual.len())].clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn same_seed_gives_the_same_reply() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        assert_eq!(
            offline_reply("tell me something", &mut a),
            offline_reply("tell me something", &mut b)
        );
    }

    #[test]
    fn flower_fact_is_revealed_only_when_asked() {
        let mut rng = StdRng::seed_from_u64(1);
        let reply = offline_reply("what's your favourite flower?", &mut rng);
        assert!(reply.contains("Sunflower"));

        let reply = offline_reply("tell me something", &mut rng);
        assert!(!reply.contains("Sunflower"));
    }

    #[test]
    fn colour_fact_matches_both_spellings() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(offline_reply("what is your favorite color?", &mut rng).contains("blue"));
        assert!(offline_reply("what colour do you like? color preference?", &mut rng).contains("blue"));
    }

    #[test]
    fn greetings_are_matched_case_insensitively() {
        let mut rng = StdRng::seed_from_u64(1);
        let reply = offline_reply("HELLO there", &mut rng);
        assert!(reply.contains("Piee") || reply.contains("🌻"));
    }

    #[test]
    fn unmatched_messages_get_a_contextual_default() {
        let mut rng = StdRng::seed_from_u64(1);
        let reply = offline_reply("xyzzy", &mut rng);
        assert!(reply.contains("🌻") || reply.contains("💙"));
    }
}
