/// Weights of the heuristic evaluation, in centipawns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HCEConfig {
    // Material
    pub pawn_value: i32,
    pub knight_value: i32,
    pub bishop_value: i32,
    pub rook_value: i32,
    pub queen_value: i32,
    pub bishop_pair_bonus: i32,

    // Pawn structure
    pub doubled_pawn_penalty: i32,  // per pawn beyond the first on a file
    pub isolated_pawn_penalty: i32, // per pawn with no friendly pawn on adjacent files
    pub passed_pawn_base: i32,      // passed pawn still on its starting rank
    pub passed_pawn_linear: i32,    // per rank advanced
    pub passed_pawn_quadratic: i32, // per rank advanced, squared

    // Mobility
    pub mobility_bonus: i32, // per pseudo-legal move more than the opponent
}

impl Default for HCEConfig {
    fn default() -> Self {
        Self {
            pawn_value: 100,
            knight_value: 320,
            bishop_value: 330,
            rook_value: 500,
            queen_value: 900,
            bishop_pair_bonus: 50,

            doubled_pawn_penalty: 20,
            isolated_pawn_penalty: 15,
            passed_pawn_base: 20,
            passed_pawn_linear: 5,
            passed_pawn_quadratic: 5,

            mobility_bonus: 4,
        }
    }
}

impl HCEConfig {
    /// Passed pawn bonus for a pawn that has advanced `ranks` ranks from its starting rank (0..=5).
    ///
    /// 20, 30, 50, 80, 120, 170 with the default weights.
    #[inline(always)]
    pub fn passed_pawn_bonus(&self, ranks: i32) -> i32 {
        self.passed_pawn_base + self.passed_pawn_linear * ranks + self.passed_pawn_quadratic * ranks * ranks
    }
}
