use std::time::Duration;

use bevy::{
    input::mouse::MouseWheel,
    math::{ivec2, IVec2, Isometry2d},
    prelude::*,
    window::PrimaryWindow,
};

use crate::{board::Board, pattern::PatternCatalog, prelude::*, state::GameState};

pub struct LifePlugin;

impl Plugin for LifePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Board::default())
            .insert_resource(BoardLayout::default())
            .insert_resource(PatternCatalog::default())
            .insert_resource(SimClock::default())
            .add_systems(OnEnter(GameState::Load), spawn_border)
            .add_systems(
                Update,
                (
                    handle_keyboard,
                    handle_wheel,
                    paint_with_pointer,
                    advance_generation,
                    render_live_cells,
                )
                    .chain()
                    .run_if(in_state(GameState::Running)),
            );
    }
}

// ——> SYSTEMS

/// frame the board with four static sprites, then start the simulation
fn spawn_border(
    mut commands: Commands,
    layout: Res<BoardLayout>,
    mut game_state: ResMut<NextState<GameState>>,
) {
    let px = layout.pixel_size();
    let vert = Vec2::new(BORDER_WIDTH_PX, px.y + 2.0 * BORDER_WIDTH_PX);
    let horiz = Vec2::new(px.x + 2.0 * BORDER_WIDTH_PX, BORDER_WIDTH_PX);
    let sides = [
        (vert, Vec2::new(-(px.x + BORDER_WIDTH_PX) * 0.5, 0.0)),
        (vert, Vec2::new((px.x + BORDER_WIDTH_PX) * 0.5, 0.0)),
        (horiz, Vec2::new(0.0, (px.y + BORDER_WIDTH_PX) * 0.5)),
        (horiz, Vec2::new(0.0, -(px.y + BORDER_WIDTH_PX) * 0.5)),
    ];
    for (size, offset) in sides {
        commands.spawn((
            Border,
            Sprite {
                color: BORDER_COLOR,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation((layout.center + offset).extend(0.0)),
        ));
    }

    game_state.set(GameState::Running);
}

fn handle_keyboard(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut clock: ResMut<SimClock>,
    mut board: ResMut<Board>,
    mut catalog: ResMut<PatternCatalog>,
    mut exit: EventWriter<AppExit>,
) {
    if keyboard.just_pressed(KeyCode::KeyP) {
        clock.paused = !clock.paused;
        info!("paused: {}", clock.paused);
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        board.clear();
        info!("board cleared");
    }
    if keyboard.just_pressed(KeyCode::ArrowRight) {
        catalog.cycle(1);
        info!("brush: {}", catalog.current().name);
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        catalog.cycle(-1);
        info!("brush: {}", catalog.current().name);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        let size = board.size();
        for y in 0..size {
            for x in 0..size {
                board.set(ivec2(x, y), fastrand::bool());
            }
        }
    }
    if keyboard.just_pressed(KeyCode::Escape) {
        exit.send(AppExit::Success);
    }
}

fn handle_wheel(mut wheel: EventReader<MouseWheel>, mut clock: ResMut<SimClock>) {
    for event in wheel.read() {
        if event.y > 0.0 {
            clock.adjust_rate(1);
        } else if event.y < 0.0 {
            clock.adjust_rate(-1);
        }
        info!("rate: {} steps/s", clock.rate());
    }
}

/// Previews the active pattern under the cursor and paints it on click.
/// Left button places, right button erases the same footprint.
fn paint_with_pointer(
    window: Query<&Window, With<PrimaryWindow>>,
    camera: Query<(&Camera, &GlobalTransform)>,
    buttons: Res<ButtonInput<MouseButton>>,
    layout: Res<BoardLayout>,
    catalog: Res<PatternCatalog>,
    mut board: ResMut<Board>,
    mut gizmos: Gizmos,
) {
    let Ok(window) = window.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok((camera, cam_transform)) = camera.get_single() else {
        return;
    };
    let Ok(world) = camera.viewport_to_world_2d(cam_transform, cursor) else {
        return;
    };

    let anchor = layout.world_to_cell(world);
    catalog.preview(anchor, &board, |pos| {
        gizmos.rect_2d(
            Isometry2d::from_translation(layout.cell_to_world(pos).truncate()),
            layout.cell_size,
            PREVIEW_COLOR,
        );
    });

    if buttons.pressed(MouseButton::Left) {
        catalog.place(anchor, true, &mut board);
    } else if buttons.pressed(MouseButton::Right) {
        catalog.place(anchor, false, &mut board);
    }
}

fn advance_generation(time: Res<Time>, mut clock: ResMut<SimClock>, mut board: ResMut<Board>) {
    if clock.paused {
        return;
    }
    if clock.ready(time.delta()) {
        board.step();
    }
}

/// One sprite per live cell, rebuilt every frame. Cost follows the
/// population, not the board area.
fn render_live_cells(
    mut commands: Commands,
    board: Res<Board>,
    layout: Res<BoardLayout>,
    sprites: Query<Entity, With<CellSprite>>,
) {
    for entity in &sprites {
        commands.entity(entity).despawn();
    }
    let cells: Vec<_> = board
        .live_cells()
        .map(|pos| {
            (
                CellSprite,
                Sprite {
                    color: CELL_ALIVE_COLOR,
                    custom_size: Some(layout.cell_size),
                    ..default()
                },
                Transform::from_translation(layout.cell_to_world(pos)),
            )
        })
        .collect();
    commands.spawn_batch(cells);
}

// ——> COMPONENTS

#[derive(Component)]
struct CellSprite;

#[derive(Component)]
struct Border;

// ——> RESOURCES

/// Gate for generation advances plus the orthogonal pause flag.
#[derive(Resource)]
pub struct SimClock {
    timer: Timer,
    rate: u32,
    pub paused: bool,
}

impl SimClock {
    pub fn new(rate: u32) -> Self {
        let rate = rate.clamp(RATE_MIN, RATE_MAX);
        Self {
            timer: Timer::new(Self::period(rate), TimerMode::Repeating),
            rate,
            paused: false,
        }
    }

    fn period(rate: u32) -> Duration {
        Duration::from_millis(1000 / rate as u64)
    }

    #[inline]
    pub fn rate(&self) -> u32 {
        self.rate
    }

    /// Nudges the target rate, clamped to `[RATE_MIN, RATE_MAX]`.
    pub fn adjust_rate(&mut self, delta: i32) {
        let rate = (self.rate as i32 + delta).clamp(RATE_MIN as i32, RATE_MAX as i32) as u32;
        if rate != self.rate {
            self.rate = rate;
            self.timer.set_duration(Self::period(rate));
        }
    }

    /// Accumulates `delta` and reports whether a generation is due. At most
    /// one advance per call; a late frame never causes catch-up steps.
    pub fn ready(&mut self, delta: Duration) -> bool {
        self.timer.tick(delta);
        self.timer.finished()
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new(RATE_DEFAULT)
    }
}

/// Owns all grid-to-pixel math on the renderer side of the fence.
#[derive(Resource, Clone, Copy)]
pub struct BoardLayout {
    /// the center of the board in world coordinates
    center: Vec2,
    /// the amount of cells on each axis
    size: u32,
    /// the size of each individual cell
    cell_size: Vec2,
}

impl BoardLayout {
    /// computes full size of the board in pixels
    #[inline]
    fn pixel_size(&self) -> Vec2 {
        self.size as f32 * self.cell_size
    }

    #[inline]
    fn cell_to_world(&self, cell: IVec2) -> Vec3 {
        (self.center - self.pixel_size() * 0.5
            + cell.as_vec2() * self.cell_size
            + self.cell_size * 0.5)
            .extend(10.0)
    }

    #[inline]
    fn world_to_cell(&self, world: Vec2) -> IVec2 {
        let origin = self.center - self.pixel_size() * 0.5;
        ((world - origin) / self.cell_size).floor().as_ivec2()
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            center: BOARD_POS,
            size: BOARD_SIZE,
            cell_size: CELL_SIZE_PX,
        }
    }
}
