// src/catalog.rs
//
// Read-only lesson and quiz fixtures. The course content is a closed set
// shipped with the application; the database only ever stores per-user
// progress against these ids.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::models::question::{Question, QuestionKind};

/// Lesson ids follow `lesson-<n>` with a bounded numeric suffix.
static LESSON_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^lesson-[1-6]$").expect("lesson id pattern must compile"));

/// A content unit with an associated quiz and duration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: &'static str,
    pub title: &'static str,
    /// CEFR level of the lesson material.
    pub category: &'static str,
    pub duration_minutes: u32,
    pub video_url: &'static str,
    pub description: &'static str,
}

pub const LESSONS: &[Lesson] = &[
    Lesson {
        id: "lesson-1",
        title: "Everyday Greetings and Introductions",
        category: "A2",
        duration_minutes: 45,
        video_url: "https://example.com/videos/lesson-1.mp4",
        description: "Master basic greetings, introductions, and common social phrases. \
                      Learn how to confidently meet new people and start conversations in English.",
    },
    Lesson {
        id: "lesson-2",
        title: "Describing People and Places",
        category: "B1",
        duration_minutes: 60,
        video_url: "https://example.com/videos/lesson-2.mp4",
        description: "Expand your vocabulary for describing appearances, personalities, and \
                      locations. Develop skills to paint vivid pictures with words.",
    },
    Lesson {
        id: "lesson-3",
        title: "Complex Sentence Structures",
        category: "B2",
        duration_minutes: 75,
        video_url: "https://example.com/videos/lesson-3.mp4",
        description: "Master advanced grammar including passive voice, conditionals, and \
                      subordinate clauses. Speak and write with sophisticated sentence construction.",
    },
    Lesson {
        id: "lesson-4",
        title: "Family and Daily Routines",
        category: "A2",
        duration_minutes: 55,
        video_url: "https://example.com/videos/lesson-4.mp4",
        description: "Learn vocabulary and expressions for family relationships and everyday \
                      activities. Describe your daily life in English with confidence.",
    },
    Lesson {
        id: "lesson-5",
        title: "Travel and Holiday Conversations",
        category: "B1",
        duration_minutes: 65,
        video_url: "https://example.com/videos/lesson-5.mp4",
        description: "Develop practical communication skills for travel situations. Book \
                      accommodations, ask for directions, and navigate new places.",
    },
    Lesson {
        id: "lesson-6",
        title: "Business and Professional Communication",
        category: "B2",
        duration_minutes: 50,
        video_url: "https://example.com/videos/lesson-6.mp4",
        description: "Master formal language for business meetings, presentations, and \
                      professional correspondence. Excel in corporate English communication.",
    },
];

/// A lesson's quiz: an ordered, immutable sequence of questions.
#[derive(Debug)]
pub struct Quiz {
    pub lesson_id: &'static str,
    pub title: &'static str,
    pub questions: Vec<Question>,
}

pub fn is_valid_lesson_id(lesson_id: &str) -> bool {
    LESSON_ID_RE.is_match(lesson_id)
}

pub fn find_lesson(lesson_id: &str) -> Option<&'static Lesson> {
    LESSONS.iter().find(|lesson| lesson.id == lesson_id)
}

pub fn quiz_for(lesson_id: &str) -> Option<&'static Quiz> {
    QUIZZES.iter().find(|quiz| quiz.lesson_id == lesson_id)
}

fn single(id: &str, prompt: &str, options: &[&str], answer: &str) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind: QuestionKind::SingleChoice {
            options: options.iter().map(|o| o.to_string()).collect(),
            answer: answer.to_string(),
        },
    }
}

fn blank(id: &str, prompt: &str, answer: &str) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind: QuestionKind::FillInBlank {
            answer: answer.to_string(),
        },
    }
}

fn binary(id: &str, prompt: &str, answer: &str) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind: QuestionKind::BinaryChoice {
            options: ["Yes".to_string(), "No".to_string()],
            answer: answer.to_string(),
        },
    }
}

fn multi(id: &str, prompt: &str, options: &[&str], answers: &[&str]) -> Question {
    Question {
        id: id.to_string(),
        prompt: prompt.to_string(),
        kind: QuestionKind::MultiSelect {
            options: options.iter().map(|o| o.to_string()).collect(),
            answers: answers.iter().map(|a| a.to_string()).collect(),
        },
    }
}

static QUIZZES: LazyLock<Vec<Quiz>> = LazyLock::new(|| {
    vec![
        Quiz {
            lesson_id: "lesson-1",
            title: "Everyday Greetings and Introductions Quiz",
            questions: vec![
                single(
                    "q1",
                    r#"What is the correct response to "How are you?""#,
                    &[
                        "I am fine, thank you",
                        "Yes, please",
                        "No, thank you",
                        "My name is John",
                    ],
                    "I am fine, thank you",
                ),
                blank("q2", "My name ________ Sarah, and I am from London.", "is"),
                binary(
                    "q3",
                    "Is 'Howdy' appropriate for formal business meetings?",
                    "No",
                ),
                multi(
                    "q4",
                    "Which of the following are polite ways to greet someone? (Select all that apply)",
                    &[
                        "Good morning",
                        "Nice to meet you",
                        "Hey buddy",
                        "How do you do?",
                        "Sup?",
                        "Pleased to make your acquaintance",
                    ],
                    &[
                        "Good morning",
                        "Nice to meet you",
                        "How do you do?",
                        "Pleased to make your acquaintance",
                    ],
                ),
            ],
        },
        Quiz {
            lesson_id: "lesson-2",
            title: "Describing People and Places Quiz",
            questions: vec![
                single(
                    "q1",
                    "Which word describes a tall building?",
                    &["High", "Tall", "Long", "Big"],
                    "Tall",
                ),
                binary("q2", "Is 'gorgeous' a compliment?", "Yes"),
                multi(
                    "q3",
                    "Which words can describe a person's appearance? (Select all that apply)",
                    &[
                        "Tall",
                        "Happy",
                        "Blue-eyed",
                        "Intelligent",
                        "Slender",
                        "Generous",
                    ],
                    &["Tall", "Blue-eyed", "Slender"],
                ),
                blank(
                    "q4",
                    "The city is very ________ with many parks and museums.",
                    "beautiful",
                ),
            ],
        },
        Quiz {
            lesson_id: "lesson-3",
            title: "Complex Sentence Structures Quiz",
            questions: vec![
                single(
                    "q1",
                    "Which sentence uses the passive voice correctly?",
                    &[
                        "The book was written by the author",
                        "The author was writing the book",
                        "The book writing was done",
                        "Writing was the book done",
                    ],
                    "The book was written by the author",
                ),
                binary("q2", "Is conditional sentences always about the future?", "No"),
                multi(
                    "q3",
                    "Which are correct ways to use subordinate clauses? (Select all that apply)",
                    &[
                        "After he finished his work",
                        "Because the weather was nice",
                        "Very quickly and happily",
                        "Although it was difficult",
                        "The big red car",
                    ],
                    &[
                        "After he finished his work",
                        "Because the weather was nice",
                        "Although it was difficult",
                    ],
                ),
                blank(
                    "q4",
                    "He can speak French, Spanish, and German ________ he is multilingual.",
                    "because",
                ),
            ],
        },
        Quiz {
            lesson_id: "lesson-4",
            title: "Family and Daily Routines Quiz",
            questions: vec![
                binary(
                    "q1",
                    "Is breakfast the most important meal of the day?",
                    "Yes",
                ),
                multi(
                    "q2",
                    "Which are common family relationships? (Select all that apply)",
                    &["Mother", "Sibling", "Cousin", "Climate", "Uncle", "Material"],
                    &["Mother", "Sibling", "Cousin", "Uncle"],
                ),
                single(
                    "q3",
                    "What is a typical morning routine?",
                    &[
                        "Wake up, shower, eat breakfast, go to work",
                        "Sleep all day",
                        "Watch TV all morning",
                        "Play sports all day",
                    ],
                    "Wake up, shower, eat breakfast, go to work",
                ),
                blank(
                    "q4",
                    "I usually ________ dinner with my family at 6 PM.",
                    "eat",
                ),
            ],
        },
        Quiz {
            lesson_id: "lesson-5",
            title: "Travel and Holiday Conversations Quiz",
            questions: vec![
                single(
                    "q1",
                    "How do you ask for a hotel room?",
                    &[
                        "I would like to book a room, please",
                        "Give me a room",
                        "Room now",
                        "Where is the room?",
                    ],
                    "I would like to book a room, please",
                ),
                binary(
                    "q2",
                    "Is a passport required for international travel?",
                    "Yes",
                ),
                multi(
                    "q3",
                    "Which documents might you need for travel? (Select all that apply)",
                    &[
                        "Passport",
                        "Visa",
                        "Driver's license",
                        "Travel itinerary",
                        "Library card",
                        "Hotel confirmation",
                    ],
                    &["Passport", "Visa", "Travel itinerary", "Hotel confirmation"],
                ),
                blank(
                    "q4",
                    "The beach is a popular ________ destination for summer holidays.",
                    "vacation",
                ),
            ],
        },
        Quiz {
            lesson_id: "lesson-6",
            title: "Business and Professional Communication Quiz",
            questions: vec![
                single(
                    "q1",
                    "How do you formally greet a business colleague?",
                    &[
                        "Good morning, Mr. Smith",
                        "Hey, what's up?",
                        "Hello buddy",
                        "Yo, how you doing?",
                    ],
                    "Good morning, Mr. Smith",
                ),
                blank(
                    "q2",
                    "Could you please send me the ________ of the meeting?",
                    "minutes",
                ),
                single(
                    "q3",
                    "Which phrase is appropriate for a formal email?",
                    &[
                        "I look forward to hearing from you",
                        "OK thanks",
                        "Whatever",
                        "Just send it",
                    ],
                    "I look forward to hearing from you",
                ),
                blank(
                    "q4",
                    "In a presentation, you should ________ your main points clearly.",
                    "explain",
                ),
            ],
        },
    ]
});
