//! Recording debug device shared by the integration tests.

#![allow(dead_code)]

use render_api::{ArrowUniforms, DebugDevice, GeometryFactory, LineGeometry, PrimitiveTopology};

#[derive(Debug, Clone, PartialEq)]
pub struct MockLine {
    pub id: usize,
    pub points: Vec<[f32; 3]>,
}

impl LineGeometry for MockLine {
    fn point_count(&self) -> u32 {
        self.points.len() as u32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    DrawLine { line: usize, model_view_proj: [f32; 16], tint: [f32; 3] },
    UseArrowProgram,
    WriteArrowData(ArrowUniforms),
    BindArrowData,
    Submit { topology: PrimitiveTopology, vertex_count: u32 },
}

#[derive(Default)]
pub struct MockDevice {
    pub commands: Vec<Command>,
    pub arrow_program_available: bool,
    pub fail_arrow_data: bool,
    pub fail_lines: bool,
    next_line: usize,
}

impl MockDevice {
    pub fn new() -> Self {
        Self { arrow_program_available: true, ..Default::default() }
    }

    pub fn submits(&self) -> usize {
        self.commands.iter().filter(|c| matches!(c, Command::Submit { .. })).count()
    }

    pub fn line_draws(&self) -> Vec<usize> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::DrawLine { line, .. } => Some(*line),
                _ => None,
            })
            .collect()
    }
}

impl GeometryFactory for MockDevice {
    type Line = MockLine;
    type ArrowData = ();

    fn create_line_geometry(&mut self, points: &[[f32; 3]]) -> Result<MockLine, String> {
        if self.fail_lines {
            return Err("vertex buffer allocation failed".to_string());
        }
        let id = self.next_line;
        self.next_line += 1;
        Ok(MockLine { id, points: points.to_vec() })
    }

    fn create_arrow_data(&mut self) -> Result<(), String> {
        if self.fail_arrow_data {
            Err("uniform buffer allocation failed".to_string())
        } else {
            Ok(())
        }
    }
}

impl DebugDevice for MockDevice {
    type Line = MockLine;
    type ArrowData = ();

    fn draw_line(&mut self, line: &MockLine, model_view_proj: &[f32; 16], tint: [f32; 3]) {
        self.commands.push(Command::DrawLine { line: line.id, model_view_proj: *model_view_proj, tint });
    }

    fn use_arrow_program(&mut self) -> bool {
        self.commands.push(Command::UseArrowProgram);
        self.arrow_program_available
    }

    fn write_arrow_data(&mut self, _data: &(), uniforms: &ArrowUniforms) {
        self.commands.push(Command::WriteArrowData(*uniforms));
    }

    fn bind_arrow_data(&mut self, _data: &()) {
        self.commands.push(Command::BindArrowData);
    }

    fn submit_draw(&mut self, topology: PrimitiveTopology, vertex_count: u32) {
        self.commands.push(Command::Submit { topology, vertex_count });
    }
}
