use super::*;

impl Dashboard {
    pub(super) fn format_uptime(seconds: u64) -> String {
        let hours = seconds / 3600;
        let minutes = (seconds % 3600) / 60;
        let secs = seconds % 60;
        format!("{:02}:{:02}:{:02}", hours, minutes, secs)
    }

    pub(super) fn render_header(frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" gpuconv ")
            .title_alignment(Alignment::Left);

        let label = Style::default().fg(Color::Gray);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let lines = vec![
            Line::from(vec![
                Span::styled("Encoder: ", label),
                Span::styled(state.encoder.clone(), value),
                Span::styled("   Format: ", label),
                Span::styled(state.format.clone(), value),
            ]),
            Line::from(vec![
                Span::styled("Output: ", label),
                Span::raw(state.output_dir.display().to_string()),
            ]),
        ];

        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    pub(super) fn render_overall(frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = Block::default().borders(Borders::ALL).title(" Progress ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.height == 0 {
            return;
        }

        let bar_state = if state.is_finished() {
            ProgressState::Done
        } else if state.current.is_some() {
            ProgressState::Running
        } else {
            ProgressState::Pending
        };

        let bar_area = Rect { height: 1, ..inner };
        frame.render_widget(
            EnhancedProgress::new(state.progress.percent(), bar_state),
            bar_area,
        );

        if inner.height > 1 {
            let label_area = Rect {
                y: inner.y + 1,
                height: 1,
                ..inner
            };
            frame.render_widget(
                Paragraph::new(state.progress.label()).alignment(Alignment::Center),
                label_area,
            );
        }
    }

    pub(super) fn render_files(frame: &mut Frame, area: Rect, state: &DashboardState) {
        let block = Block::default().borders(Borders::ALL).title(" Files ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let visible = inner.height as usize;
        if visible == 0 {
            return;
        }

        // Keep the running file roughly centred once the list overflows
        let focus = state.current.unwrap_or(state.progress.completed);
        let max_offset = state.rows.len().saturating_sub(visible);
        let offset = focus.saturating_sub(visible / 2).min(max_offset);

        let lines: Vec<Line> = state
            .rows
            .iter()
            .skip(offset)
            .take(visible)
            .map(|row| {
                let (tag, style) = match &row.state {
                    FileState::Pending => ("  queued ", Style::default().fg(Color::DarkGray)),
                    FileState::Running => (
                        " running ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    ),
                    FileState::Done => ("    done ", Style::default().fg(Color::Green)),
                    FileState::Failed(_) => ("  failed ", Style::default().fg(Color::Red)),
                };

                let mut spans = vec![Span::styled(tag, style), Span::raw(row.name.clone())];
                if let FileState::Failed(reason) = &row.state {
                    spans.push(Span::styled(
                        format!("  ({})", reason),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), inner);
    }

    pub(super) fn render_footer(frame: &mut Frame, area: Rect, state: &DashboardState) {
        let elapsed = Self::format_uptime(state.started_at.elapsed().as_secs());

        let line = match &state.summary {
            Some(summary) if summary.failed.is_empty() => Line::from(vec![
                Span::styled(
                    "Video conversion completed.",
                    Style::default().fg(Color::Green),
                ),
                Span::raw(format!("  {}  [q] quit", elapsed)),
            ]),
            Some(summary) => Line::from(vec![
                Span::styled(
                    "Video conversion completed.",
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!("  {} of {} failed", summary.failed.len(), summary.total),
                    Style::default().fg(Color::Red),
                ),
                Span::raw(format!("  {}  [q] quit", elapsed)),
            ]),
            None if state.quit_refused => Line::from(Span::styled(
                format!("{}  A running batch cannot be cancelled; waiting for it to finish", elapsed),
                Style::default().fg(Color::Yellow),
            )),
            None => Line::from(Span::styled(
                format!("{}  Converting...", elapsed),
                Style::default().fg(Color::Gray),
            )),
        };

        frame.render_widget(Paragraph::new(line), area);
    }
}
