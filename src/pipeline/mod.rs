//! The sequential tessa pipeline.
//!
//! Ingestion → optional structural transforms (conforming Delaunay, mesh
//! refinement, conforming Gabriel; always in that order) → identity
//! finalization → emission. After each transform the faces are
//! reclassified against the ring geometry and labels of subdivided input
//! edges are recovered. All state lives in [`Pipeline`]; nothing is global.

pub mod finalize;
pub mod ingest;
pub mod repair;

pub use ingest::{Chain, IngestionContext};

use std::io::Write;

use crate::domain::{Domain, classify_faces, hole_seeds};
use crate::geometry::Point;
use crate::io::{GeometryInput, OutputGraph, parse_wkt, write_graph};
use crate::kernel::{KernelFault, MeshCriteria, TransformOutcome, Triangulation};
use crate::mesh_error::MeshError;

/// What to do with the ingested triangulation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Make the triangulation conforming Delaunay.
    pub conforming_delaunay: bool,
    /// Refine into a quality mesh.
    pub mesh: bool,
    /// Make the triangulation conforming Gabriel.
    pub gabriel: bool,
    /// Criteria used by mesh refinement.
    pub criteria: MeshCriteria,
    /// Text written into every edge's free-for column.
    pub free_for: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        PipelineOptions {
            conforming_delaunay: false,
            mesh: false,
            gabriel: false,
            criteria: MeshCriteria::default(),
            free_for: String::new(),
        }
    }
}

impl PipelineOptions {
    /// Requested transforms in execution order.
    pub fn operations(&self) -> Vec<Operation> {
        let mut ops = Vec::new();
        if self.conforming_delaunay {
            ops.push(Operation::ConformingDelaunay);
        }
        if self.mesh {
            ops.push(Operation::Mesh(self.criteria));
        }
        if self.gabriel {
            ops.push(Operation::ConformingGabriel);
        }
        ops
    }
}

/// A structural transform of the triangulation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Operation {
    ConformingDelaunay,
    Mesh(MeshCriteria),
    ConformingGabriel,
}

/// Counts gathered while running the pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PipelineReport {
    pub input_vertices: usize,
    pub edges_inserted: usize,
    pub operations_applied: usize,
    pub kernel_faults: Vec<KernelFault>,
    /// Transforms that stopped before completion, in execution order.
    pub partial_operations: Vec<Operation>,
    pub labels_recovered: usize,
}

/// Triangulation plus the provenance state built on top of it.
pub struct Pipeline {
    tri: Triangulation,
    ctx: IngestionContext,
    seeds: Vec<Point>,
    report: PipelineReport,
}

impl Pipeline {
    /// Ingests `input` and places one seed per hole.
    pub fn ingest(input: &GeometryInput) -> Self {
        let mut tri = Triangulation::new();
        let ctx = IngestionContext::ingest(&mut tri, input);
        let seeds = hole_seeds(&input.polygon);
        let report = PipelineReport {
            input_vertices: tri.num_vertices(),
            edges_inserted: ctx.edges_inserted(),
            ..PipelineReport::default()
        };
        Pipeline {
            tri,
            ctx,
            seeds,
            report,
        }
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.tri
    }

    pub fn context(&self) -> &IngestionContext {
        &self.ctx
    }

    pub fn seeds(&self) -> &[Point] {
        &self.seeds
    }

    pub fn report(&self) -> &PipelineReport {
        &self.report
    }

    /// Applies one transform, then reclassifies faces and repairs labels.
    ///
    /// A rejected transform leaves the triangulation as it was; it is logged
    /// and recorded in the report, never propagated.
    pub fn apply(&mut self, op: Operation) {
        let domain = Domain::from_rings(&self.tri, &self.ctx.rings());
        let result = match op {
            Operation::ConformingDelaunay => {
                log::info!("Making conforming Delaunay triangulation...");
                self.tri.make_conforming_delaunay()
            }
            Operation::Mesh(criteria) => {
                log::info!(
                    "Making mesh with parameters B={} and S={} ...",
                    criteria.shape_bound,
                    criteria.size_bound
                );
                self.tri.refine_mesh(&self.seeds, criteria, |p| domain.contains(p))
            }
            Operation::ConformingGabriel => {
                log::info!("Making conforming Gabriel graph...");
                self.tri.make_conforming_gabriel()
            }
        };
        match result {
            Ok(TransformOutcome::Applied { .. }) => {}
            Ok(TransformOutcome::Partial { vertices_added }) => {
                log::error!(
                    "{op:?} stopped before completion after adding {vertices_added} vertices"
                );
                self.report.partial_operations.push(op);
            }
            Err(fault) => {
                log::error!("{fault}");
                self.report.kernel_faults.push(fault);
            }
        }
        self.report.operations_applied += 1;
        log::info!("Number of vertices is now: {}", self.tri.num_vertices());

        classify_faces(&mut self.tri, &domain);
        self.report.labels_recovered += repair::repair_labels(&self.tri, self.ctx.table_mut());
    }

    /// Applies the requested transforms and emits the final graph.
    ///
    /// With no transforms the input chains' own edges are emitted; otherwise
    /// every triangulation edge touching a face in the domain is.
    pub fn run(mut self, options: &PipelineOptions) -> (OutputGraph, PipelineReport) {
        let ops = options.operations();
        for &op in &ops {
            self.apply(op);
        }

        let graph = if ops.is_empty() {
            log::warn!("Did not do anything to the input.");
            finalize::chain_graph(&self.tri, self.ctx.chains(), self.ctx.table())
        } else {
            finalize::assign_missing_ids(&mut self.tri, self.ctx.ids_mut());
            finalize::domain_graph(&self.tri, self.ctx.table())
        };
        log::info!("Done.");
        (graph, self.report)
    }
}

/// Parses `wkt`, runs the pipeline and writes the graph to `out`.
pub fn process<W: Write>(
    wkt: &str,
    options: &PipelineOptions,
    out: &mut W,
) -> Result<PipelineReport, MeshError> {
    let input = parse_wkt(wkt)?;
    process_input(&input, options, out)
}

/// Runs the pipeline on already parsed input and writes the graph to `out`.
pub fn process_input<W: Write>(
    input: &GeometryInput,
    options: &PipelineOptions,
    out: &mut W,
) -> Result<PipelineReport, MeshError> {
    let (graph, report) = Pipeline::ingest(input).run(options);
    write_graph(out, &graph, &options.free_for)?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operations_run_in_fixed_order() {
        let options = PipelineOptions {
            gabriel: true,
            conforming_delaunay: true,
            mesh: true,
            ..PipelineOptions::default()
        };
        assert_eq!(
            options.operations(),
            vec![
                Operation::ConformingDelaunay,
                Operation::Mesh(MeshCriteria::default()),
                Operation::ConformingGabriel
            ]
        );
        assert!(PipelineOptions::default().operations().is_empty());
    }

    #[test]
    fn options_deserialize_with_defaults() {
        let options: PipelineOptions =
            serde_json::from_str(r#"{"mesh": true, "free_for": "bike"}"#).unwrap();
        assert!(options.mesh);
        assert!(!options.gabriel);
        assert_eq!(options.criteria, MeshCriteria::default());
        assert_eq!(options.free_for, "bike");
    }

    #[test]
    fn hole_gets_a_seed() {
        let input = parse_wkt("POLYGON((0 0,4 0,4 4,0 4,0 0),(1 1,3 1,3 3,1 3,1 1))").unwrap();
        let pipeline = Pipeline::ingest(&input);
        assert_eq!(pipeline.seeds().len(), 1);
        assert_eq!(pipeline.report().input_vertices, 8);
        assert_eq!(pipeline.report().edges_inserted, 8);
    }

    #[test]
    fn rejected_criteria_is_reported_not_fatal() {
        let input = parse_wkt("POLYGON((0 0,4 0,4 4,0 4,0 0))").unwrap();
        let options = PipelineOptions {
            mesh: true,
            criteria: MeshCriteria::new(-1.0, 0.0),
            ..PipelineOptions::default()
        };
        let (graph, report) = Pipeline::ingest(&input).run(&options);
        assert_eq!(report.kernel_faults.len(), 1);
        assert_eq!(graph.vertices.len(), 4);
        assert_eq!(graph.edges.len(), 5);
    }

    #[test]
    fn partial_refinement_is_reported() {
        let input = parse_wkt("POLYGON((0 0,10 0,10 10,0 10,0 0))").unwrap();
        let criteria = MeshCriteria::new(0.125, 1.0).with_vertex_budget(3);
        let options = PipelineOptions {
            mesh: true,
            criteria,
            ..PipelineOptions::default()
        };
        let (_, report) = Pipeline::ingest(&input).run(&options);
        assert_eq!(report.partial_operations, vec![Operation::Mesh(criteria)]);
        assert!(report.kernel_faults.is_empty());
    }

    #[test]
    fn complete_refinement_is_not_partial() {
        let input = parse_wkt("POLYGON((0 0,4 0,4 4,0 4,0 0))").unwrap();
        let options = PipelineOptions {
            mesh: true,
            criteria: MeshCriteria::new(0.125, 1.0),
            ..PipelineOptions::default()
        };
        let (_, report) = Pipeline::ingest(&input).run(&options);
        assert!(report.partial_operations.is_empty());
        assert_eq!(report.operations_applied, 1);
    }
}
