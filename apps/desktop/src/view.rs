use iced::{
    Alignment, Color, Element, Length,
    widget::{
        Column, button, column, container, horizontal_space, pick_list, row, scrollable, text,
        text_editor, text_input,
    },
};

use scriptflow_core::{
    AdvancedField, AppScreen, DurationChoice, FormEdit, PLATFORMS, RefineDialog, ScoreBand,
    ScriptAnalysis, ScriptSegment, SegmentField, StudioEvent, StudioState, TONES, Theme, ViewMode,
    format::format_score, narration_text, word_count,
};

use crate::{App, Message, SceneEditors};

type ButtonStyle = fn(&iced::Theme, button::Status) -> button::Style;

const HELP_TIPS: &[(&str, &str)] = &[
    (
        "Hype Score?",
        "The AI evaluates your script out of 10 based on hook strength, pacing, and platform retention triggers.",
    ),
    (
        "Refine & Perfect",
        "In Production View, use Refine on any scene to rewrite it. You can ask for \"more cinematic lighting\" or \"funnier dialogue\".",
    ),
    (
        "Deep Customization",
        "Use the Studio settings to define a \"Speaker Persona\" (e.g. \"Casey Neistat style\") to drastically change the voice of the script.",
    ),
];

fn studio(event: StudioEvent) -> Message {
    Message::Studio(event)
}

fn form(edit: FormEdit) -> Message {
    Message::Studio(StudioEvent::Form(edit))
}

fn toggle_style(selected: bool) -> ButtonStyle {
    if selected { button::primary } else { button::secondary }
}

fn score_color(score: f64) -> Color {
    match ScoreBand::of(score) {
        ScoreBand::Excellent => Color::from_rgb8(0x22, 0xc5, 0x5e),
        ScoreBand::Strong => Color::from_rgb8(0x63, 0x66, 0xf1),
        ScoreBand::Average => Color::from_rgb8(0xea, 0xb3, 0x08),
        ScoreBand::Weak => Color::from_rgb8(0xef, 0x44, 0x44),
    }
}

fn error_color() -> Color {
    Color::from_rgb8(0xef, 0x44, 0x44)
}

pub fn render(app: &App) -> Element<'_, Message> {
    let state = &app.studio;

    let mut page = Column::new().spacing(20).padding(24).push(header(app));

    if state.show_help {
        page = page.push(help_panel());
    }
    if let Some(notice) = &app.notice {
        page = page.push(text(notice).size(14));
    }

    let body = match state.screen {
        AppScreen::Splash => splash(state),
        AppScreen::Generating => generating(app.provider_name),
        AppScreen::Editor => editor(state, &app.scenes),
    };
    page = page.push(body);

    scrollable(container(page).width(Length::Fill).max_width(1100)).into()
}

fn header(app: &App) -> Element<'_, Message> {
    let mut bar = row![text("ScriptFlow Pro").size(26), horizontal_space()]
        .spacing(12)
        .align_y(Alignment::Center);

    if app.studio.screen == AppScreen::Editor {
        bar = bar.push(
            button(text("← Back to Studio"))
                .style(button::secondary)
                .on_press(studio(StudioEvent::BackToStudio)),
        );
    }

    let theme_label = match app.theme {
        Theme::Light => "Dark mode",
        Theme::Dark => "Light mode",
    };
    bar.push(
        button(text("Help"))
            .style(button::text)
            .on_press(studio(StudioEvent::ToggleHelp)),
    )
    .push(button(text(theme_label)).style(button::text).on_press(Message::ToggleTheme))
    .into()
}

fn help_panel() -> Element<'static, Message> {
    let mut tips = Column::new().spacing(12).push(text("ScriptFlow Studio Tips").size(20));
    for (title, body) in HELP_TIPS {
        tips = tips.push(column![text(*title).size(16), text(*body).size(14)].spacing(4));
    }
    tips = tips.push(
        button(text("Let's Create"))
            .style(button::primary)
            .on_press(studio(StudioEvent::ToggleHelp)),
    );
    container(tips).padding(16).style(container::rounded_box).into()
}

fn splash(state: &StudioState) -> Element<'_, Message> {
    let tones: Vec<String> = TONES.iter().map(|t| t.to_string()).collect();
    let platforms: Vec<String> = PLATFORMS.iter().map(|p| p.to_string()).collect();

    let mut durations = row![].spacing(8);
    for choice in DurationChoice::ALL {
        durations = durations.push(
            button(text(choice.label()))
                .style(toggle_style(state.duration_choice == choice))
                .on_press(form(FormEdit::Duration(choice))),
        );
    }

    let mut fields = Column::new()
        .spacing(16)
        .push(text("Create Viral Videos").size(40))
        .push(text(
            "The AI-powered production studio that turns simple ideas into production-ready scripts with cinematic direction.",
        ))
        .push(text("PROJECT TITLE").size(13))
        .push(
            text_input("e.g., Why Mechanical Watches Are Making a Comeback", &state.title)
                .on_input(|value| form(FormEdit::Title(value)))
                .on_submit(studio(StudioEvent::Submit))
                .padding(12),
        )
        .push(
            row![
                column![
                    text("TONE").size(13),
                    pick_list(tones, Some(state.tone.clone()), |tone| form(FormEdit::Tone(tone))),
                ]
                .spacing(6),
                column![
                    text("PLATFORM").size(13),
                    pick_list(platforms, Some(state.platform.clone()), |platform| {
                        form(FormEdit::Platform(platform))
                    }),
                ]
                .spacing(6),
            ]
            .spacing(24),
        )
        .push(text("DURATION").size(13))
        .push(durations);

    if state.duration_choice == DurationChoice::Custom {
        fields = fields.push(
            text_input("Specific duration (e.g. 45s)", &state.custom_duration)
                .on_input(|value| form(FormEdit::CustomDuration(value)))
                .padding(10),
        );
    }

    let advanced_label = if state.show_advanced {
        "▲ Studio Settings"
    } else {
        "▼ Studio Settings"
    };
    fields = fields.push(
        button(text(advanced_label))
            .style(button::text)
            .on_press(form(FormEdit::ToggleAdvanced)),
    );
    if state.show_advanced {
        for field in AdvancedField::ALL {
            fields = fields.push(
                column![
                    text(field.label()).size(13),
                    text_input(field.hint(), state.advanced.get(field))
                        .on_input(move |value| form(FormEdit::Advanced(field, value)))
                        .padding(8),
                ]
                .spacing(4),
            );
        }
    }

    if let Some(error) = &state.error {
        fields = fields.push(text(error).color(error_color()));
    }

    let can_submit = state.title_is_valid();
    fields = fields.push(
        button(text("Generate Script").size(18))
            .padding(14)
            .style(button::primary)
            .on_press_maybe(can_submit.then(|| studio(StudioEvent::Submit))),
    );

    container(fields).padding(24).style(container::rounded_box).into()
}

fn generating(provider: &'static str) -> Element<'static, Message> {
    container(
        column![
            text("Synthesizing Vision...").size(32),
            text(format!("Writing your script with {provider}. This can take a moment.")),
        ]
        .spacing(12)
        .align_x(Alignment::Center),
    )
    .width(Length::Fill)
    .padding(80)
    .center_x(Length::Fill)
    .into()
}

fn editor<'a>(state: &'a StudioState, scenes: &'a [SceneEditors]) -> Element<'a, Message> {
    let mut page = Column::new().spacing(20);

    page = page.push(
        column![
            text(&state.title).size(30),
            text(format!(
                "Date: {}   Format: {}   Tone: {}   Duration: {}",
                chrono::Local::now().format("%Y-%m-%d"),
                state.platform,
                state.tone,
                state.duration_label()
            ))
            .size(14),
        ]
        .spacing(6),
    );

    if let Some(analysis) = &state.analysis {
        page = page.push(hype_rating(analysis));
    }

    page = page.push(
        row![
            button(text("Clean Script"))
                .style(toggle_style(state.view_mode == ViewMode::Clean))
                .on_press(studio(StudioEvent::SetViewMode(ViewMode::Clean))),
            button(text("Production View"))
                .style(toggle_style(state.view_mode == ViewMode::Production))
                .on_press(studio(StudioEvent::SetViewMode(ViewMode::Production))),
        ]
        .spacing(8),
    );

    if let Some(alert) = &state.alert {
        page = page.push(
            container(
                row![
                    text(alert).color(error_color()),
                    horizontal_space(),
                    button(text("OK")).on_press(studio(StudioEvent::DismissAlert)),
                ]
                .align_y(Alignment::Center),
            )
            .padding(12)
            .style(container::rounded_box),
        );
    }

    let body = match state.view_mode {
        ViewMode::Clean => clean_view(state.script()),
        ViewMode::Production => production_view(scenes, state.refine.as_ref()),
    };
    page.push(body).into()
}

fn hype_rating(analysis: &ScriptAnalysis) -> Element<'_, Message> {
    let score = column![
        text(format_score(analysis.score)).size(48).color(score_color(analysis.score)),
        text("HYPE SCORE").size(12),
    ]
    .align_x(Alignment::Center)
    .width(140);

    let mut factors = Column::new().spacing(4).push(text("VIRAL FACTORS").size(12));
    for factor in &analysis.viral_factors {
        factors = factors.push(text(format!("• {factor}")).size(14));
    }

    let mut tips = Column::new().spacing(4).push(text("PLATFORM TIPS").size(12));
    for tip in &analysis.platform_tips {
        tips = tips.push(text(format!("• {tip}")).size(14));
    }

    container(
        row![
            score,
            column![
                text(&analysis.headline).size(22),
                row![factors.width(Length::FillPortion(1)), tips.width(Length::FillPortion(1))]
                    .spacing(24),
            ]
            .spacing(12),
        ]
        .spacing(24)
        .align_y(Alignment::Center),
    )
    .padding(20)
    .style(container::rounded_box)
    .into()
}

fn clean_view(script: &[ScriptSegment]) -> Element<'_, Message> {
    let mut paragraphs = Column::new()
        .spacing(18)
        .push(
            row![
                text("Narration Script").size(24),
                horizontal_space(),
                button(text("Copy Text"))
                    .style(button::secondary)
                    .on_press(Message::CopyNarration),
            ]
            .align_y(Alignment::Center),
        );
    for segment in script {
        paragraphs = paragraphs.push(text(&segment.narration).size(17));
    }
    paragraphs = paragraphs.push(
        row![
            text(format!("~{} words", word_count(&narration_text(script)))).size(13),
            horizontal_space(),
            text("Optimized for Text-to-Speech").size(13),
        ],
    );
    container(paragraphs).padding(28).style(container::rounded_box).into()
}

fn production_view<'a>(
    scenes: &'a [SceneEditors],
    refine: Option<&'a RefineDialog>,
) -> Element<'a, Message> {
    let mut table = Column::new().spacing(12).push(
        row![
            horizontal_space(),
            button(text("Print / Save Sheet"))
                .style(button::secondary)
                .on_press(Message::Print),
            button(text("Export CSV"))
                .style(button::secondary)
                .on_press(Message::ExportCsv),
        ]
        .spacing(8),
    );

    if let Some(dialog) = refine {
        table = table.push(refine_dialog(dialog));
    }

    table = table.push(
        row![
            text("#").width(50),
            text("VISUAL PRODUCTION NOTES").width(Length::FillPortion(1)),
            text("NARRATION").width(Length::FillPortion(1)),
        ]
        .spacing(12),
    );

    for (index, scene) in scenes.iter().enumerate() {
        table = table.push(
            row![
                column![
                    text((index + 1).to_string()),
                    button(text("Refine").size(12))
                        .style(button::text)
                        .on_press(studio(StudioEvent::OpenRefine(index))),
                ]
                .spacing(4)
                .width(50),
                container(
                    text_editor(&scene.visual)
                        .placeholder("Visual description")
                        .on_action(move |action| {
                            Message::EditScene(index, SegmentField::Visual, action)
                        })
                        .padding(8),
                )
                .width(Length::FillPortion(1)),
                container(
                    text_editor(&scene.narration)
                        .placeholder("Narration")
                        .on_action(move |action| {
                            Message::EditScene(index, SegmentField::Narration, action)
                        })
                        .padding(8),
                )
                .width(Length::FillPortion(1)),
            ]
            .spacing(12),
        );
    }

    container(table).padding(16).style(container::rounded_box).into()
}

fn refine_dialog(dialog: &RefineDialog) -> Element<'_, Message> {
    let can_submit = !dialog.in_flight && !dialog.feedback.trim().is_empty();
    let submit_label = if dialog.in_flight { "Regenerating..." } else { "Regenerate" };

    container(
        column![
            text(format!("Refine Scene {}", dialog.index + 1)).size(18),
            text(
                "How should I improve this specific scene? The AI will rewrite the visual and narration based on your feedback.",
            )
            .size(14),
            text_input(
                "e.g., Make the visual more dramatic, switch to a drone shot, or make the joke funnier.",
                &dialog.feedback,
            )
            .on_input(|value| studio(StudioEvent::RefineFeedbackChanged(value)))
            .on_submit(studio(StudioEvent::SubmitRefine))
            .padding(10),
            row![
                horizontal_space(),
                button(text("Cancel"))
                    .style(button::text)
                    .on_press(studio(StudioEvent::CloseRefine)),
                button(text(submit_label))
                    .style(button::primary)
                    .on_press_maybe(can_submit.then(|| studio(StudioEvent::SubmitRefine))),
            ]
            .spacing(8),
        ]
        .spacing(12),
    )
    .padding(16)
    .style(container::rounded_box)
    .into()
}
