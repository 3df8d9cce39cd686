//! Static asset table for the drill plus the loaded handle resource.
use std::{collections::HashMap, fmt};

use bevy::prelude::*;

/// Still images referenced by the drill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageKey {
    Classroom,
    AfterEarthquake,
    Modal,
    Hiding,
    Running,
}

impl ImageKey {
    pub const ALL: [ImageKey; 5] = [
        Self::Classroom,
        Self::AfterEarthquake,
        Self::Modal,
        Self::Hiding,
        Self::Running,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Classroom => "images/bg_classroom.jpg",
            Self::AfterEarthquake => "images/bg_afterearthquake.jpg",
            Self::Modal => "images/modal.png",
            Self::Hiding => "images/hiding_under_bench.jpg",
            Self::Running => "images/runningeq.jpg",
        }
    }
}

/// Animated sprite sheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetKey {
    Talker,
    Fan,
}

impl SheetKey {
    pub const ALL: [SheetKey; 2] = [Self::Talker, Self::Fan];

    pub fn path(self) -> &'static str {
        match self {
            Self::Talker => "images/talker.png",
            Self::Fan => "images/fansprite.png",
        }
    }

    /// Size of one frame in pixels.
    pub fn frame_size(self) -> UVec2 {
        match self {
            Self::Talker => UVec2::new(1000, 1000),
            Self::Fan => UVec2::new(370, 220),
        }
    }

    /// Grid layout as (columns, rows).
    pub fn grid(self) -> (u32, u32) {
        match self {
            Self::Talker => (4, 1),
            Self::Fan => (5, 5),
        }
    }

    /// Atlas indices played in a loop, and the playback rate.
    pub fn animation(self) -> (&'static [usize], f32) {
        match self {
            Self::Talker => (&[0, 1, 2, 3], 4.0),
            Self::Fan => (&[0, 5, 20], 8.0),
        }
    }
}

/// Every sound the drill can play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Earthquake,
    Line1,
    Line2,
    Line3,
    Line4,
    Question,
    Options,
    ConsequenceHide,
    ConsequenceLeave,
}

const LINE_CUES: [SoundCue; 4] = [
    SoundCue::Line1,
    SoundCue::Line2,
    SoundCue::Line3,
    SoundCue::Line4,
];

impl SoundCue {
    pub const ALL: [SoundCue; 9] = [
        Self::Earthquake,
        Self::Line1,
        Self::Line2,
        Self::Line3,
        Self::Line4,
        Self::Question,
        Self::Options,
        Self::ConsequenceHide,
        Self::ConsequenceLeave,
    ];

    /// Voice clip recorded for the dialogue line at `index`, if there is one.
    pub fn for_line(index: usize) -> Option<Self> {
        LINE_CUES.get(index).copied()
    }

    pub fn path(self) -> &'static str {
        match self {
            Self::Earthquake => "audio/earthquake.ogg",
            Self::Line1 => "audio/dialogue_1.ogg",
            Self::Line2 => "audio/dialogue_2.ogg",
            Self::Line3 => "audio/dialogue_3.ogg",
            Self::Line4 => "audio/dialogue_4.ogg",
            Self::Question => "audio/question.ogg",
            Self::Options => "audio/options.ogg",
            Self::ConsequenceHide => "audio/consequence_1.ogg",
            Self::ConsequenceLeave => "audio/consequence_2.ogg",
        }
    }
}

impl fmt::Display for SoundCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Earthquake => "earthquake",
            Self::Line1 => "line-1",
            Self::Line2 => "line-2",
            Self::Line3 => "line-3",
            Self::Line4 => "line-4",
            Self::Question => "question",
            Self::Options => "options",
            Self::ConsequenceHide => "consequence-hide",
            Self::ConsequenceLeave => "consequence-leave",
        };
        write!(f, "{}", label)
    }
}

/// Image handle plus atlas layout for one sprite sheet.
#[derive(Debug, Clone)]
pub struct SheetHandles {
    pub image: Handle<Image>,
    pub layout: Handle<TextureAtlasLayout>,
}

/// Handles for everything in the asset table, requested once at startup.
#[derive(Resource, Debug, Default)]
pub struct LessonAssets {
    images: HashMap<ImageKey, Handle<Image>>,
    sheets: HashMap<SheetKey, SheetHandles>,
    sounds: HashMap<SoundCue, Handle<AudioSource>>,
}

impl LessonAssets {
    pub fn image(&self, key: ImageKey) -> Option<Handle<Image>> {
        self.images.get(&key).cloned()
    }

    pub fn sheet(&self, key: SheetKey) -> Option<&SheetHandles> {
        self.sheets.get(&key)
    }

    pub fn sound(&self, cue: SoundCue) -> Option<Handle<AudioSource>> {
        self.sounds.get(&cue).cloned()
    }
}

/// Queues every asset in the table with the asset server.
pub fn load_lesson_assets(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let mut assets = LessonAssets::default();

    for key in ImageKey::ALL {
        assets.images.insert(key, asset_server.load(key.path()));
    }

    for key in SheetKey::ALL {
        let (columns, rows) = key.grid();
        let layout = TextureAtlasLayout::from_grid(key.frame_size(), columns, rows, None, None);
        assets.sheets.insert(
            key,
            SheetHandles {
                image: asset_server.load(key.path()),
                layout: layouts.add(layout),
            },
        );
    }

    for cue in SoundCue::ALL {
        assets.sounds.insert(cue, asset_server.load(cue.path()));
    }

    info!(
        "Queued {} images, {} sprite sheets, {} sounds",
        assets.images.len(),
        assets.sheets.len(),
        assets.sounds.len()
    );
    commands.insert_resource(assets);
}
