//! One Health quiz questions

use super::QuizQuestion;

pub static QUIZ_QUESTIONS: &[QuizQuestion] = &[
    QuizQuestion {
        question: "What is the primary goal of the 'One Health' approach promoted by India?",
        options: [
            "Focusing only on human medicine.",
            "Recognizing the interconnection between people, animals, plants, and their shared environment to achieve optimal health outcomes.",
            "Developing new antibiotics for animal use only.",
            "Separating veterinary and human health sectors.",
        ],
        correct_answer: "Recognizing the interconnection between people, animals, plants, and their shared environment to achieve optimal health outcomes.",
        explanation: "The One Health concept is a collaborative, multisectoral approach that acknowledges the deep links between human, animal, and environmental health to tackle health threats holistically.",
    },
    QuizQuestion {
        question: "Which of these is a key area of focus for India's One Health framework in combating AMR (Antimicrobial Resistance)?",
        options: [
            "Increasing over-the-counter sales of antibiotics.",
            "Using last-resort antibiotics for minor infections.",
            "Strengthening surveillance of antibiotic use and resistance in both humans and animals.",
            "Promoting antibiotic use in agriculture to boost crop yields.",
        ],
        correct_answer: "Strengthening surveillance of antibiotic use and resistance in both humans and animals.",
        explanation: "A major pillar of the One Health strategy for AMR is integrated surveillance, which helps monitor resistance trends across different sectors to inform public health actions.",
    },
    QuizQuestion {
        question: "Zoonotic diseases are a major concern within the One Health framework. What are they?",
        options: [
            "Diseases that only affect animals in zoos.",
            "Diseases that are resistant to all known antibiotics.",
            "Diseases that naturally spread from animals to people.",
            "Diseases caused by environmental pollution.",
        ],
        correct_answer: "Diseases that naturally spread from animals to people.",
        explanation: "Zoonotic diseases, like rabies, Nipah virus, and certain types of influenza, are infections that can be transmitted between animals and humans, making them a perfect example of why the One Health approach is critical.",
    },
    QuizQuestion {
        question: "To support the One Health mission, what is a crucial action for citizens to take regarding antibiotics?",
        options: [
            "Sharing their prescribed antibiotics with family members.",
            "Pressuring doctors for antibiotics to treat viral infections like the common cold.",
            "Always completing the full prescribed course of antibiotics, even if they start feeling better.",
            "Disposing of unused antibiotics in regular trash or toilets.",
        ],
        correct_answer: "Always completing the full prescribed course of antibiotics, even if they start feeling better.",
        explanation: "Finishing the entire course ensures that all harmful bacteria are eliminated. Stopping early can allow remaining bacteria to survive, mutate, and develop resistance.",
    },
];
