//! Fixed wording for each recommendation tier

use crate::core::models::{Color, Tier};

/// Title, message template, recommendation, action and color for one tier
///
/// Templates may contain `{grade}`, `{goal}`, `{prereq}`, `{threshold}` and
/// `{alternatives}`; see [`Placeholders`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierBundle {
    /// Heading shown above the recommendation
    pub title: &'static str,
    /// Main message template
    pub message: &'static str,
    /// Recommendation template
    pub recommendation: &'static str,
    /// Suggested next action template
    pub action: &'static str,
    /// Display color tag
    pub color: Color,
}

/// Values substituted into a [`TierBundle`]'s templates
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    /// Reported grade band label (e.g., "70-79%")
    pub grade: String,
    /// Goal course display name
    pub goal: String,
    /// Prerequisite course display name
    pub prereq: String,
    /// Recommended minimum grade label (e.g., "65%")
    pub threshold: String,
    /// Alternative course names joined with "or"
    pub alternatives: String,
}

impl Placeholders {
    /// Substitute every placeholder in `template`
    #[must_use]
    pub fn fill(&self, template: &str) -> String {
        template
            .replace("{grade}", &self.grade)
            .replace("{goal}", &self.goal)
            .replace("{prereq}", &self.prereq)
            .replace("{threshold}", &self.threshold)
            .replace("{alternatives}", &self.alternatives)
    }
}

/// Look up the fixed bundle for a tier
#[must_use]
pub const fn bundle(tier: Tier) -> TierBundle {
    match tier {
        Tier::Ready => TierBundle {
            title: "You're ready!",
            message: "Your grade of {grade} in {prereq} meets the recommended {threshold} for {goal}.",
            recommendation: "You have a solid foundation for {goal}.",
            action: "Register for {goal}.",
            color: Color::Green,
        },
        Tier::Caution => TierBundle {
            title: "Proceed with caution",
            message: "Your grade of {grade} in {prereq} is below the recommended {threshold} for {goal}.",
            recommendation: "You can take {goal}, but plan for extra study time and review {prereq} concepts early.",
            action: "Register for {goal} and book regular check-ins with your teacher.",
            color: Color::Yellow,
        },
        Tier::Repeat => TierBundle {
            title: "Consider repeating the prerequisite",
            message: "A grade of {grade} in {prereq} suggests gaps that will make {goal} difficult.",
            recommendation: "Retake {prereq} to strengthen your foundation before moving on to {goal}.",
            action: "Register for {prereq} again, or upgrade it through summer school or online learning.",
            color: Color::Red,
        },
        Tier::PathwayChange => TierBundle {
            title: "Consider a different pathway",
            message: "A grade of {grade} in {prereq} indicates this pathway may not be the best fit right now.",
            recommendation: "Consider {alternatives} before attempting {goal}.",
            action: "Talk to a counsellor about switching to {alternatives}.",
            color: Color::Red,
        },
        Tier::ConsiderAlt => TierBundle {
            title: "Consider an alternative course",
            message: "With {grade} in {prereq}, {goal} may be a stretch.",
            recommendation: "{alternatives} covers similar material at a more manageable pace and still meets many program requirements.",
            action: "Compare {goal} with {alternatives} against your post-secondary plans.",
            color: Color::Blue,
        },
        Tier::TakePrereq => TierBundle {
            title: "Take the prerequisite first",
            message: "{prereq} does not lead directly into {goal}.",
            recommendation: "Complete {alternatives} before enrolling in {goal}.",
            action: "Register for {alternatives}.",
            color: Color::Orange,
        },
        Tier::MissingPrereq => TierBundle {
            title: "Prerequisite required",
            message: "{goal} requires {prereq}, which you have not taken yet.",
            recommendation: "Complete {prereq} before enrolling in {goal}.",
            action: "Register for {prereq}.",
            color: Color::Red,
        },
        Tier::Review => TierBundle {
            title: "Review recommended",
            message: "We don't have guidance for {prereq} leading into {goal}.",
            recommendation: "Your situation needs a closer look by an advisor.",
            action: "Contact advising to review your course plan.",
            color: Color::Gray,
        },
        Tier::Unknown => TierBundle {
            title: "More information needed",
            message: "We couldn't determine a recommendation for {goal} from the details provided.",
            recommendation: "Check your prerequisite status and grade, then try again.",
            action: "Contact advising if you're unsure which course to take.",
            color: Color::Gray,
        },
    }
}
