//! Fallback task synthesizer
//!
//! Deterministic, template-based plan generation used when the LLM path
//! fails for any reason. Each category maps to a fixed ordered task list;
//! post-processing (ids, deadlines, status) is shared with the LLM path
//! so both produce structurally identical plans.
//!
//! Deadlines are an index-based heuristic (3 days per task), not derived
//! from estimated hours. This is not a scheduler.

use chrono::{DateTime, Duration, Utc};
use planstore::{Task, Timeline};
use regex::Regex;
use tracing::debug;

use super::analyzer::GoalCategory;
use super::{finalize_tasks, Priority, TaskSeed};

/// Default plan length when no timeframe is given or it cannot be parsed
const DEFAULT_TIMEFRAME_DAYS: i64 = 14;

/// Synthesize a full task list and timeline for a category
pub fn synthesize(category: GoalCategory, goal: &str, timeframe: &str, now: DateTime<Utc>) -> (Vec<Task>, Timeline) {
    debug!(?category, %timeframe, "synthesize: called");

    let seeds = match category {
        GoalCategory::CodingLearning => coding_learning_tasks(goal),
        GoalCategory::LanguageLearning => language_learning_tasks(),
        GoalCategory::Learning => learning_tasks(goal),
        GoalCategory::Development => development_tasks(goal),
        GoalCategory::Business => business_tasks(goal),
        GoalCategory::Fitness => fitness_tasks(),
        GoalCategory::General => generic_tasks(goal),
    };

    let tasks = finalize_tasks(seeds, now);
    let timeline = Timeline {
        start_date: now,
        end_date: calculate_end_date(timeframe, now),
    };

    (tasks, timeline)
}

/// Compute the plan end date from loose timeframe text
///
/// Matches on unit substrings and a leading integer: "3 months" → 90
/// days, "weeks" alone → 14 days (default 2 weeks). Calendar-naive; a
/// month is always 30 days.
pub fn calculate_end_date(timeframe: &str, now: DateTime<Utc>) -> DateTime<Utc> {
    let mut days = DEFAULT_TIMEFRAME_DAYS;

    if !timeframe.is_empty() {
        let leading = leading_integer(timeframe);
        if timeframe.contains("month") {
            days = leading.unwrap_or(1) * 30;
        } else if timeframe.contains("week") {
            days = leading.unwrap_or(2) * 7;
        } else if timeframe.contains("day") {
            days = leading.unwrap_or(14);
        }
    }

    debug!(%timeframe, days, "calculate_end_date: resolved");
    now + Duration::days(days)
}

/// Parse a leading integer off the timeframe text, if any
fn leading_integer(text: &str) -> Option<i64> {
    let re = Regex::new(r"^\s*(\d+)").expect("leading integer pattern is valid");
    re.captures(text).and_then(|c| c[1].parse().ok())
}

fn seed(
    name: &str,
    description: String,
    estimated_hours: f64,
    dependencies: &[&str],
    priority: Priority,
) -> TaskSeed {
    TaskSeed {
        name: name.to_string(),
        description,
        estimated_hours,
        dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        priority,
        deadline: None,
    }
}

fn coding_learning_tasks(goal: &str) -> Vec<TaskSeed> {
    vec![
        seed(
            "Research learning path and resources",
            format!("Find the best tutorials, documentation, and practice resources for {goal}"),
            6.0,
            &[],
            Priority::High,
        ),
        seed(
            "Set up development environment",
            "Install necessary IDEs, tools, and configure coding environment".to_string(),
            4.0,
            &["Research learning path and resources"],
            Priority::High,
        ),
        seed(
            "Learn basic syntax and concepts",
            "Study fundamental programming concepts and language syntax".to_string(),
            15.0,
            &["Set up development environment"],
            Priority::Medium,
        ),
        seed(
            "Practice with small coding exercises",
            "Solve coding challenges and build small programs to reinforce learning".to_string(),
            20.0,
            &["Learn basic syntax and concepts"],
            Priority::Medium,
        ),
        seed(
            "Build a complete project",
            "Develop a full project to apply all learned concepts practically".to_string(),
            25.0,
            &["Practice with small coding exercises"],
            Priority::Medium,
        ),
        seed(
            "Learn debugging and best practices",
            "Study debugging techniques and industry best practices".to_string(),
            10.0,
            &["Build a complete project"],
            Priority::Low,
        ),
        seed(
            "Explore advanced topics and next steps",
            "Research advanced concepts and plan continued learning path".to_string(),
            8.0,
            &["Learn debugging and best practices"],
            Priority::Low,
        ),
    ]
}

fn language_learning_tasks() -> Vec<TaskSeed> {
    vec![
        seed(
            "Assess current level and set goals",
            "Evaluate starting proficiency and define specific learning objectives".to_string(),
            2.0,
            &[],
            Priority::High,
        ),
        seed(
            "Gather learning materials",
            "Collect textbooks, apps, online courses, and practice resources".to_string(),
            3.0,
            &["Assess current level and set goals"],
            Priority::High,
        ),
        seed(
            "Learn basic vocabulary and phrases",
            "Study essential words and common expressions".to_string(),
            15.0,
            &["Gather learning materials"],
            Priority::Medium,
        ),
        seed(
            "Practice grammar and sentence structure",
            "Study grammatical rules and practice constructing sentences".to_string(),
            20.0,
            &["Learn basic vocabulary and phrases"],
            Priority::Medium,
        ),
        seed(
            "Develop listening and speaking skills",
            "Practice comprehension and conversation through various media".to_string(),
            25.0,
            &["Practice grammar and sentence structure"],
            Priority::Medium,
        ),
        seed(
            "Immerse in the language",
            "Engage with native content, find language partners, and practice regularly".to_string(),
            30.0,
            &["Develop listening and speaking skills"],
            Priority::Low,
        ),
    ]
}

fn learning_tasks(goal: &str) -> Vec<TaskSeed> {
    vec![
        seed(
            "Define learning objectives and scope",
            format!("Clearly outline what you want to achieve with {goal}"),
            3.0,
            &[],
            Priority::High,
        ),
        seed(
            "Research learning resources and materials",
            "Find books, courses, tutorials, and other learning materials".to_string(),
            4.0,
            &["Define learning objectives and scope"],
            Priority::High,
        ),
        seed(
            "Create study schedule and plan",
            "Develop a structured learning plan with milestones".to_string(),
            2.0,
            &["Research learning resources and materials"],
            Priority::High,
        ),
        seed(
            "Learn fundamental concepts",
            "Study the basic principles and foundational knowledge".to_string(),
            20.0,
            &["Create study schedule and plan"],
            Priority::Medium,
        ),
        seed(
            "Apply knowledge through practice",
            "Reinforce learning through exercises and practical application".to_string(),
            18.0,
            &["Learn fundamental concepts"],
            Priority::Medium,
        ),
        seed(
            "Review and assess progress",
            "Evaluate understanding and identify areas for improvement".to_string(),
            5.0,
            &["Apply knowledge through practice"],
            Priority::Low,
        ),
    ]
}

fn development_tasks(goal: &str) -> Vec<TaskSeed> {
    vec![
        seed(
            "Define project requirements and features",
            format!("Outline specific functionality and requirements for {goal}"),
            6.0,
            &[],
            Priority::High,
        ),
        seed(
            "Plan technical architecture",
            "Design system structure, database schema, and technology stack".to_string(),
            8.0,
            &["Define project requirements and features"],
            Priority::High,
        ),
        seed(
            "Set up development environment",
            "Install and configure necessary tools, frameworks, and libraries".to_string(),
            4.0,
            &["Plan technical architecture"],
            Priority::High,
        ),
        seed(
            "Develop core functionality",
            "Implement main features and backend logic".to_string(),
            35.0,
            &["Set up development environment"],
            Priority::Medium,
        ),
        seed(
            "Create user interface",
            "Develop frontend components and user experience".to_string(),
            25.0,
            &["Develop core functionality"],
            Priority::Medium,
        ),
        seed(
            "Testing and quality assurance",
            "Perform unit testing, integration testing, and bug fixing".to_string(),
            15.0,
            &["Create user interface"],
            Priority::Medium,
        ),
        seed(
            "Deployment and launch preparation",
            "Prepare for deployment, configure servers, and final testing".to_string(),
            8.0,
            &["Testing and quality assurance"],
            Priority::Low,
        ),
    ]
}

fn business_tasks(goal: &str) -> Vec<TaskSeed> {
    vec![
        seed(
            "Research market and competitors",
            format!("Study the target market, customer needs, and competition for {goal}"),
            5.0,
            &[],
            Priority::High,
        ),
        seed(
            "Draft a business plan",
            "Define the offering, pricing, costs, and revenue expectations".to_string(),
            8.0,
            &["Research market and competitors"],
            Priority::High,
        ),
        seed(
            "Handle legal and registration requirements",
            "Register the business and sort out licenses, permits, and taxes".to_string(),
            6.0,
            &["Draft a business plan"],
            Priority::High,
        ),
        seed(
            "Secure funding and set a budget",
            "Line up starting capital and allocate it across startup costs".to_string(),
            10.0,
            &["Draft a business plan"],
            Priority::Medium,
        ),
        seed(
            "Set up operations and suppliers",
            "Arrange premises, equipment, suppliers, and day-to-day processes".to_string(),
            15.0,
            &["Handle legal and registration requirements"],
            Priority::Medium,
        ),
        seed(
            "Launch and promote",
            "Open for business and run initial marketing to attract customers".to_string(),
            12.0,
            &["Set up operations and suppliers"],
            Priority::Low,
        ),
    ]
}

fn fitness_tasks() -> Vec<TaskSeed> {
    vec![
        seed(
            "Assess current fitness level",
            "Record baseline measurements, endurance, and strength".to_string(),
            2.0,
            &[],
            Priority::High,
        ),
        seed(
            "Define measurable fitness goals",
            "Set specific, trackable targets with dates".to_string(),
            2.0,
            &["Assess current fitness level"],
            Priority::High,
        ),
        seed(
            "Create a workout schedule",
            "Plan weekly training sessions balancing intensity and rest".to_string(),
            3.0,
            &["Define measurable fitness goals"],
            Priority::High,
        ),
        seed(
            "Plan nutrition and recovery",
            "Adjust diet and sleep to support the training plan".to_string(),
            4.0,
            &["Define measurable fitness goals"],
            Priority::Medium,
        ),
        seed(
            "Complete the first two weeks of training",
            "Follow the schedule and log every session".to_string(),
            14.0,
            &["Create a workout schedule"],
            Priority::Medium,
        ),
        seed(
            "Review progress and adjust the plan",
            "Compare results against goals and tune the schedule".to_string(),
            3.0,
            &["Complete the first two weeks of training"],
            Priority::Low,
        ),
    ]
}

fn generic_tasks(goal: &str) -> Vec<TaskSeed> {
    vec![
        seed(
            "Clarify the goal and define success",
            format!("Write down what finishing {goal} looks like and how to measure it"),
            3.0,
            &[],
            Priority::High,
        ),
        seed(
            "Research what the goal requires",
            "Identify the skills, resources, and steps involved".to_string(),
            5.0,
            &["Clarify the goal and define success"],
            Priority::High,
        ),
        seed(
            "Break the work into milestones",
            "Split the goal into ordered milestones with rough dates".to_string(),
            3.0,
            &["Research what the goal requires"],
            Priority::Medium,
        ),
        seed(
            "Execute the first milestone",
            "Start working and complete the first concrete milestone".to_string(),
            10.0,
            &["Break the work into milestones"],
            Priority::Medium,
        ),
        seed(
            "Review progress and plan next steps",
            "Check progress against the milestones and adjust the plan".to_string(),
            3.0,
            &["Execute the first milestone"],
            Priority::Low,
        ),
    ]
}
