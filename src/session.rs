//! One editing session: the graph, its selection controller and its layout.
//!
//! Every host event goes through [`GraphSession::handle`] or
//! [`GraphSession::advance`], each of which runs to completion before
//! returning. Both take `&mut self`, so a tick can never interleave with an
//! edit, and the tick path only ever sees the graph by shared reference.

use log::{info, warn};

use crate::config::HarvestConfig;
use crate::controller::{Mode, Outcome, SelectionController};
use crate::layout::{ForceSimulation, LayoutBridge, Simulation};
use crate::model::{Graph, PersistError, VertexId};
use crate::protocol::{Input, Instruction};

/// Owner of all mutable editing state for one page.
pub struct GraphSession<S: Simulation = ForceSimulation> {
	graph: Graph,
	controller: SelectionController,
	layout: LayoutBridge<S>,
}

impl GraphSession<ForceSimulation> {
	/// Empty session with the default force simulation.
	pub fn new(config: &HarvestConfig, width: f64, height: f64) -> Self {
		Self::from_graph(Graph::new(), config, width, height)
	}

	/// Wrap an existing graph with the default force simulation.
	pub fn from_graph(graph: Graph, config: &HarvestConfig, width: f64, height: f64) -> Self {
		let simulation = ForceSimulation::new(&config.simulation);
		Self::with_simulation(graph, config, LayoutBridge::new(simulation, width, height))
	}

	/// Restore a saved graph, or start empty if there is none or it is malformed.
	pub fn load_or_empty(
		saved: Option<&str>,
		config: &HarvestConfig,
		width: f64,
		height: f64,
	) -> Self {
		Self::from_graph(restore(saved), config, width, height)
	}
}

/// Parse saved state, discarding it with a warning when it cannot be used.
pub fn restore(saved: Option<&str>) -> Graph {
	let Some(json) = saved else {
		return Graph::new();
	};
	match Graph::from_json(json) {
		Ok(graph) => {
			info!(
				"harvest: restored {} vertices, {} edges",
				graph.vertices().len(),
				graph.edges().len()
			);
			graph
		}
		Err(e) => {
			warn!("harvest: discarding saved graph, starting empty: {}", e);
			Graph::new()
		}
	}
}

impl<S: Simulation> GraphSession<S> {
	/// Build a session around an existing layout bridge and bind the graph to it.
	pub fn with_simulation(graph: Graph, config: &HarvestConfig, layout: LayoutBridge<S>) -> Self {
		let mut session = Self {
			graph,
			controller: SelectionController::new(config),
			layout,
		};
		session.layout.sync(&session.graph);
		session
	}

	/// The graph being edited.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// The layout bridge and its simulation.
	pub fn layout(&self) -> &LayoutBridge<S> {
		&self.layout
	}

	/// Current selection mode.
	pub fn mode(&self) -> Mode {
		SelectionController::mode(&self.graph)
	}

	/// Apply one host event and return what the host should display.
	pub fn handle(&mut self, input: Input) -> Vec<Instruction> {
		let graph = &mut self.graph;
		let controller = &mut self.controller;
		let outcome = match input {
			Input::CreateVertexRequested(selection) => controller.create_vertex(graph, selection),
			Input::CreateEdgeRequested => controller.create_edge(graph),
			Input::VertexChosen(vertex) => controller.vertex_chosen(graph, vertex),
			Input::AttributeClicked {
				vertex,
				index,
				selection,
			} => controller.attribute_clicked(graph, vertex, index, selection),
			Input::EndpointSlotClicked(slot) => controller.endpoint_slot_clicked(graph, slot),
			Input::DirectionToggled => controller.direction_toggled(graph),
			Input::DeleteSelectionRequested => controller.delete_selection(graph),
			Input::ViewportResized { width, height } => {
				return vec![self.layout.resize(width, height)];
			}
		};
		self.finish(outcome)
	}

	fn finish(&mut self, outcome: Outcome) -> Vec<Instruction> {
		let Outcome {
			mut instructions,
			resync,
		} = outcome;
		if resync {
			instructions.push(self.layout.sync(&self.graph));
		}
		instructions
	}

	/// Advance the layout by `dt` seconds.
	pub fn advance(&mut self, dt: f32) -> Vec<Instruction> {
		vec![Instruction::LayoutTick(self.layout.on_tick(&self.graph, dt))]
	}

	/// Current bind instruction, for a host that attaches after construction.
	pub fn bind(&mut self) -> Instruction {
		self.layout.sync(&self.graph)
	}

	/// Pin a vertex where the user dropped it. Only its position changes.
	pub fn drag_vertex(&mut self, vertex: VertexId, x: f64, y: f64) {
		self.layout.drag(vertex, x, y);
	}

	/// Serialize the graph for storage.
	pub fn save(&self) -> Result<String, PersistError> {
		self.graph.to_json()
	}
}
