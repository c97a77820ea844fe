pub mod covenant_graph;
