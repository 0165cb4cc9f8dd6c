/// Sheet configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SheetConfig {
    /// Hard ceiling on the sum of all six attribute scores. Increments that
    /// would push the total past this value are rejected.
    pub attribute_point_cap: i32,

    /// Floor for any single attribute score. Decrements below this value
    /// are rejected.
    pub min_score: i32,

    /// Skill points granted before the Intelligence modifier applies.
    pub base_skill_points: i32,

    /// Extra skill points granted per point of Intelligence modifier.
    pub skill_points_per_modifier: i32,
}

impl SheetConfig {
    // ===== defaults =====
    pub const DEFAULT_ATTRIBUTE_POINT_CAP: i32 = 70;
    pub const DEFAULT_MIN_SCORE: i32 = 1;
    pub const DEFAULT_BASE_SKILL_POINTS: i32 = 10;
    pub const DEFAULT_SKILL_POINTS_PER_MODIFIER: i32 = 4;

    /// Score every attribute starts at for a fresh character.
    pub const DEFAULT_SCORE: i32 = 10;

    pub fn new() -> Self {
        Self {
            attribute_point_cap: Self::DEFAULT_ATTRIBUTE_POINT_CAP,
            min_score: Self::DEFAULT_MIN_SCORE,
            base_skill_points: Self::DEFAULT_BASE_SKILL_POINTS,
            skill_points_per_modifier: Self::DEFAULT_SKILL_POINTS_PER_MODIFIER,
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self::new()
    }
}
