// src/ui/screens/systems.rs
//
// Systems for spawning and despawning the drill screens.

use bevy::{ecs::message::MessageReader, prelude::*};

use crate::lesson::{
    assets::{ImageKey, LessonAssets},
    components::LessonButton,
    events::LessonCommand,
    script::QuizChoice,
    types::{ScreenKind, ScreenView},
};

use super::components::{ScreenLayout, ScreenRoot, ScreenTracker};

// Visual constants
const START_BUTTON_COLOR: Color = Color::srgb(0.145, 0.388, 0.922);
const OPTION_BACKGROUND: Color = Color::srgb(0.94, 0.94, 0.94);
const MODAL_FALLBACK: Color = Color::srgba(1.0, 1.0, 1.0, 0.95);
const MODAL_TEXT_COLOR: Color = Color::BLACK;
const GO_BACK_BACKGROUND: Color = Color::BLACK;
const HOVER_TINT: f32 = 0.85;

const START_LABEL: &str = "Start Module";
const GO_BACK_LABEL: &str = "Go Back";

/// Idle colour of a button, restored when the pointer leaves it.
#[derive(Component, Debug, Clone, Copy)]
pub struct ButtonPalette {
    idle: Color,
}

/// Spawn and despawn screens as the lesson flow requests.
pub fn apply_screen_commands(
    mut commands: Commands,
    mut tracker: ResMut<ScreenTracker>,
    layout: Res<ScreenLayout>,
    assets: Option<Res<LessonAssets>>,
    mut lesson_commands: MessageReader<LessonCommand>,
) {
    for command in lesson_commands.read() {
        match command {
            LessonCommand::ShowScreen(view) => {
                let kind = view.kind();
                if let Some(stale) = tracker.active.remove(&kind) {
                    commands.entity(stale).despawn();
                }

                let root = spawn_screen(&mut commands, &layout, assets.as_deref(), view);
                debug!("Spawned {:?} screen as {:?}", kind, root);
                tracker.active.insert(kind, root);
            }
            LessonCommand::ClearScreen(kind) => {
                if let Some(root) = tracker.active.remove(kind) {
                    commands.entity(root).despawn();
                    debug!("Despawned {:?} screen {:?}", kind, root);
                }
            }
            _ => {}
        }
    }
}

/// Darken buttons under the pointer.
#[allow(clippy::type_complexity)]
pub fn highlight_hovered_buttons(
    mut buttons: Query<
        (&Interaction, &ButtonPalette, &mut BackgroundColor),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, palette, mut background) in buttons.iter_mut() {
        background.0 = match interaction {
            Interaction::Hovered | Interaction::Pressed => darken(palette.idle),
            Interaction::None => palette.idle,
        };
    }
}

fn darken(color: Color) -> Color {
    let srgba = color.to_srgba();
    Color::srgba(
        srgba.red * HOVER_TINT,
        srgba.green * HOVER_TINT,
        srgba.blue * HOVER_TINT,
        srgba.alpha,
    )
}

fn spawn_screen(
    commands: &mut Commands,
    layout: &ScreenLayout,
    assets: Option<&LessonAssets>,
    view: &ScreenView,
) -> Entity {
    let kind = view.kind();
    let modal = assets.and_then(|assets| assets.image(ImageKey::Modal));

    let root_node = match kind {
        ScreenKind::Start | ScreenKind::Quiz => Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            ..default()
        },
        ScreenKind::Dialogue | ScreenKind::Consequence => Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Center,
            padding: UiRect::top(Val::Px(layout.message_top_offset)),
            row_gap: Val::Px(16.0),
            ..default()
        },
    };

    commands
        .spawn((root_node, ScreenRoot(kind), Name::new(format!("{:?} Screen", kind))))
        .with_children(|parent| match view {
            ScreenView::Start => {
                spawn_button(
                    parent,
                    LessonButton::Start,
                    START_LABEL,
                    layout.start_font_size,
                    START_BUTTON_COLOR,
                    Color::WHITE,
                    Some(layout.start_button_size),
                );
            }
            ScreenView::Dialogue { text } => {
                spawn_modal(parent, modal, layout.message_modal_size, |panel| {
                    spawn_modal_text(panel, text, layout.dialogue_font_size, layout.text_wrap_width);
                });
            }
            ScreenView::Quiz { prompt, options } => {
                spawn_modal(parent, modal, layout.quiz_modal_size, |panel| {
                    spawn_modal_text(
                        panel,
                        prompt,
                        layout.quiz_prompt_font_size,
                        layout.text_wrap_width,
                    );
                    for choice in options {
                        spawn_option(panel, *choice, layout.option_font_size);
                    }
                    spawn_go_back(panel, layout.go_back_font_size);
                });
            }
            ScreenView::Consequence { message, image, .. } => {
                if let Some(handle) = assets.and_then(|assets| assets.image(*image)) {
                    parent.spawn((
                        Node {
                            position_type: PositionType::Absolute,
                            left: Val::Px(0.0),
                            top: Val::Px(0.0),
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        ImageNode::new(handle),
                        Name::new("Consequence Image"),
                    ));
                }
                spawn_modal(parent, modal, layout.message_modal_size, |panel| {
                    spawn_modal_text(
                        panel,
                        message,
                        layout.consequence_font_size,
                        layout.text_wrap_width,
                    );
                });
                spawn_go_back(parent, layout.go_back_font_size);
            }
        })
        .id()
}

fn spawn_modal(
    parent: &mut ChildSpawnerCommands,
    modal: Option<Handle<Image>>,
    size: Vec2,
    contents: impl FnOnce(&mut ChildSpawnerCommands),
) {
    let mut panel = parent.spawn((
        Node {
            width: Val::Px(size.x),
            height: Val::Px(size.y),
            flex_direction: FlexDirection::Column,
            justify_content: JustifyContent::Center,
            align_items: AlignItems::Center,
            row_gap: Val::Px(14.0),
            padding: UiRect::all(Val::Px(24.0)),
            ..default()
        },
        Name::new("Modal"),
    ));

    match modal {
        Some(handle) => panel.insert(ImageNode::new(handle)),
        None => panel.insert(BackgroundColor(MODAL_FALLBACK)),
    };

    panel.with_children(contents);
}

fn spawn_modal_text(parent: &mut ChildSpawnerCommands, text: &str, font_size: f32, wrap: f32) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(MODAL_TEXT_COLOR),
        Node {
            max_width: Val::Px(wrap),
            ..default()
        },
    ));
}

fn spawn_option(parent: &mut ChildSpawnerCommands, choice: QuizChoice, font_size: f32) {
    spawn_button(
        parent,
        LessonButton::Option(choice),
        choice.label(),
        font_size,
        OPTION_BACKGROUND,
        MODAL_TEXT_COLOR,
        None,
    );
}

fn spawn_go_back(parent: &mut ChildSpawnerCommands, font_size: f32) {
    spawn_button(
        parent,
        LessonButton::GoBack,
        GO_BACK_LABEL,
        font_size,
        GO_BACK_BACKGROUND,
        Color::WHITE,
        None,
    );
}

fn spawn_button(
    parent: &mut ChildSpawnerCommands,
    button: LessonButton,
    label: &str,
    font_size: f32,
    background: Color,
    text_color: Color,
    size: Option<Vec2>,
) {
    let (width, height) = match size {
        Some(size) => (Val::Px(size.x), Val::Px(size.y)),
        None => (Val::Auto, Val::Auto),
    };

    parent
        .spawn((
            Node {
                width,
                height,
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            Button,
            Interaction::None,
            BackgroundColor(background),
            ButtonPalette { idle: background },
            button,
            Name::new(format!("{:?} Button", button)),
        ))
        .with_children(|inner| {
            inner.spawn((
                Text::new(label),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(text_color),
            ));
        });
}
