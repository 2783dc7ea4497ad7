use soulguide_model::{KeywordEntry, KeywordTable, Replies, ResponseTable};

/// Reply table shipped with the site. Written to `responses.yaml` when the
/// user has none.
pub fn builtin_table() -> ResponseTable {
    let entries = make_keyword_entries()
        .into_iter()
        .map(|(keyword, replies)| KeywordEntry::new(keyword, replies))
        .collect::<Result<Vec<_>, _>>()
        .expect("builtin keyword entries");
    ResponseTable::new(
        KeywordTable::try_from(entries).expect("builtin keywords are unique"),
        Replies::try_from(make_default_replies()).expect("builtin default replies"),
    )
}

fn make_keyword_entries() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        (
            "meditation",
            vec![
                "Meditation is a beautiful practice that connects you with your inner self. Start with just 5-10 minutes daily, focusing on your breath. Find a quiet space, sit comfortably, and gently observe your thoughts without judgment.",
                "Begin your meditation journey by creating a sacred space in your home. Light a candle or use essential oils. Start with guided meditations - there are many wonderful apps and videos available to help you begin.",
                "Meditation isn't about emptying your mind, but about becoming aware of your thoughts. When your mind wanders, gently bring your attention back to your breath. This is the practice - returning to the present moment.",
            ],
        ),
        (
            "soul activation",
            vec![
                "Soul activation is the process of awakening your true essence and connecting with your higher purpose. It involves clearing energetic blockages and aligning with your authentic self.",
                "Your soul has always known its purpose. Soul activation helps you remember who you truly are beneath the layers of conditioning and limiting beliefs. It's about coming home to yourself.",
                "Through soul activation, you can access your inner wisdom, increase your intuition, and live a life aligned with your highest potential. It's a journey of self-discovery and empowerment.",
            ],
        ),
        (
            "chakra",
            vec![
                "Chakras are energy centers in your body that affect your physical, emotional, and spiritual well-being. There are seven main chakras, each associated with different aspects of life.",
                "To balance your chakras, try meditation, yoga, or energy healing. Each chakra responds to different colors, sounds, and affirmations. Start by focusing on one chakra at a time.",
                "Your chakras can become blocked due to stress, trauma, or negative emotions. Regular energy work, meditation, and mindful living can help keep them balanced and flowing freely.",
            ],
        ),
        (
            "energy healing",
            vec![
                "Energy healing works on the subtle energy systems of your body to promote balance and well-being. It can help release emotional blockages and restore your natural energy flow.",
                "There are many forms of energy healing - Reiki, crystal healing, sound therapy, and more. The key is finding a practice that resonates with you and your unique energy.",
                "Energy healing isn't just about fixing problems - it's about creating a deeper connection with yourself and the universal life force energy that flows through all things.",
            ],
        ),
        (
            "purpose",
            vec![
                "Your life purpose is often found in what brings you joy, what you're naturally good at, and what you feel called to do. Pay attention to what lights you up and makes you feel most alive.",
                "Finding your purpose is a journey, not a destination. It often involves trial and error, self-reflection, and being open to new experiences. Trust that your path will unfold naturally.",
                "Your purpose may evolve over time. What matters most is living authentically and making a positive impact in your own unique way. Listen to your heart and follow your intuition.",
            ],
        ),
        (
            "stress",
            vec![
                "Stress and anxiety are signals from your body that something needs attention. Try deep breathing exercises, meditation, or gentle movement to help calm your nervous system.",
                "Remember that you are not your thoughts or emotions. Practice observing them without judgment, like clouds passing through the sky. This awareness can help you find peace.",
                "Creating a daily self-care routine can help manage stress. This might include meditation, journaling, spending time in nature, or doing something creative that brings you joy.",
            ],
        ),
        (
            "spiritual",
            vec![
                "Spirituality is about connecting with something greater than yourself - whether that's the universe, nature, or your own inner wisdom. It's a deeply personal journey.",
                "Trust your intuition - it's your soul's way of communicating with you. The more you listen to and follow your inner guidance, the stronger it becomes.",
                "Remember that you are a spiritual being having a human experience. Embrace both the light and shadow aspects of yourself - they all serve your growth and evolution.",
            ],
        ),
    ]
}

fn make_default_replies() -> Vec<&'static str> {
    vec![
        "That's a wonderful question! I'm here to help guide you on your spiritual journey. Could you tell me more about what specific aspect you'd like to explore?",
        "I sense you're seeking deeper understanding. Trust that the answers you need are already within you. What feels most important to you right now?",
        "Your question touches on something meaningful. Remember, spiritual growth is a journey of self-discovery. What practices or experiences have brought you closer to your authentic self?",
        "I'm here to support your spiritual awakening. Every question is an opportunity for growth. What would you like to explore together today?",
        "Your curiosity is beautiful! The spiritual path is unique for each person. What aspects of your spiritual journey are you most curious about right now?",
        "Thank you for sharing that with me. I believe everyone has their own path to spiritual understanding. What feels like your next step in your journey?",
        "Your question shows wisdom and openness. Remember, there are no wrong questions on the spiritual path. What would help you feel more connected to your authentic self?",
        "I appreciate your openness to learning and growing. Spiritual wisdom often comes through experience and reflection. What practices have you found most helpful so far?",
    ]
}
