#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("capacity exceeded: the window already holds {capacity} symbols")]
    CapacityExceeded { capacity: usize },
    #[error("cannot delete the first symbol of an empty window")]
    EmptyStructure,
}

pub type Result<T> = std::result::Result<T, Error>;
