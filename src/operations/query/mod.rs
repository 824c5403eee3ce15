mod adjacency;

pub use adjacency::MeshAdjacency;
