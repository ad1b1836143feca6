#![allow(dead_code)]
use tessa::pipeline::{PipelineOptions, process};

/// One parsed edge line of the output.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeLine {
    pub from: i64,
    pub to: i64,
    pub squared_distance: f64,
    pub free_for: String,
    pub edge_type: String,
}

/// Parsed output of the pipeline.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub vertices: Vec<(i64, f64, f64)>,
    pub edges: Vec<EdgeLine>,
}

impl Parsed {
    pub fn count(&self, edge_type: &str) -> usize {
        self.edges.iter().filter(|e| e.edge_type == edge_type).count()
    }

    /// Sum of edge lengths of one type.
    pub fn length(&self, edge_type: &str) -> f64 {
        self.edges
            .iter()
            .filter(|e| e.edge_type == edge_type)
            .map(|e| e.squared_distance.sqrt())
            .sum()
    }
}

/// Runs the pipeline on `wkt` and parses the text it writes.
pub fn run(wkt: &str, options: &PipelineOptions) -> Parsed {
    let mut out = Vec::new();
    process(wkt, options, &mut out).expect("pipeline should succeed");
    parse_output(&String::from_utf8(out).expect("utf8 output"))
}

pub fn parse_output(text: &str) -> Parsed {
    let mut lines = text.lines();
    let n: usize = lines.next().unwrap().parse().unwrap();
    let m: usize = lines.next().unwrap().parse().unwrap();
    let vertices: Vec<_> = lines
        .by_ref()
        .take(n)
        .map(|line| {
            let f: Vec<&str> = line.split(';').collect();
            assert_eq!(f.len(), 3, "bad vertex line {line:?}");
            (f[0].parse().unwrap(), f[1].parse().unwrap(), f[2].parse().unwrap())
        })
        .collect();
    let edges: Vec<_> = lines
        .map(|line| {
            let f: Vec<&str> = line.split(';').collect();
            assert_eq!(f.len(), 7, "bad edge line {line:?}");
            assert_eq!(f[4], "1");
            assert_eq!(f[6], "");
            EdgeLine {
                from: f[0].parse().unwrap(),
                to: f[1].parse().unwrap(),
                squared_distance: f[2].parse().unwrap(),
                free_for: f[3].to_string(),
                edge_type: f[5].to_string(),
            }
        })
        .collect();
    assert_eq!(vertices.len(), n);
    assert_eq!(edges.len(), m);
    Parsed { vertices, edges }
}

pub const SQUARE: &str = "POLYGON((0 0,4 0,4 4,0 4,0 0))";
pub const SQUARE_WITH_HOLE: &str = "POLYGON((0 0,4 0,4 4,0 4,0 0),(1 1,3 1,3 3,1 3,1 1))";
