/// Lock mode requested for the entities of a query.
///
/// Carried on the descriptor for the query layer. Materialization only
/// consults it to warn about unmapped version members.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LockHint {
    #[default]
    None,
    Optimistic,
    OptimisticForceIncrement,
    PessimisticRead,
    PessimisticWrite,
    PessimisticForceIncrement,
}

impl LockHint {
    /// Returns `true` for the modes that rely on a version member.
    pub fn is_optimistic(self) -> bool {
        matches!(self, Self::Optimistic | Self::OptimisticForceIncrement)
    }
}
