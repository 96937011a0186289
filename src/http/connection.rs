use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite, BufReader};
use tracing::Instrument;

use crate::http::context::{ConnectionId, RequestContext};
use crate::http::parser::read_request;
use crate::http::request::{ConnectionOutcome, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

pub struct Connection<S> {
    stream: BufReader<S>,
    wait_before_response: Duration,
    id: ConnectionId,
    state: ConnectionState,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter, ConnectionOutcome),
    Closed,
}

/// How a single request cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exchange {
    /// A response was written; the outcome says whether to keep going.
    Completed(ConnectionOutcome),
    /// The peer closed the stream before sending a request line.
    AlreadyClosed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, wait_before_response: Duration, id: ConnectionId) -> Self {
        Self {
            stream: BufReader::new(stream),
            wait_before_response,
            id,
            state: ConnectionState::Reading,
        }
    }

    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Serves requests until the peer asks to close, goes away, or sends
    /// something unparseable. Errors leave the connection `Closed`.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            let ctx = RequestContext::new(self.id);

            match self.handle_request(ctx).instrument(ctx.span()).await? {
                Exchange::Completed(ConnectionOutcome::KeepAlive) => {}

                Exchange::Completed(ConnectionOutcome::Close) => {
                    tracing::info!(conn_id = %self.id, "closing connection on client request");
                    break;
                }

                Exchange::AlreadyClosed => {
                    tracing::info!(conn_id = %self.id, "peer closed connection after previous request");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Runs one request cycle: read, wait, respond, decide.
    pub async fn handle_request(&mut self, ctx: RequestContext) -> anyhow::Result<Exchange> {
        let result = self.drive(ctx).await;

        if result.is_err() {
            self.state = ConnectionState::Closed;
        }

        result
    }

    async fn drive(&mut self, ctx: RequestContext) -> anyhow::Result<Exchange> {
        tracing::info!(req_id = %ctx.request_id, "request started");

        loop {
            match &mut self.state {
                ConnectionState::Reading => match read_request(&mut self.stream).await? {
                    Some(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    None => {
                        self.state = ConnectionState::Closed;
                        return Ok(Exchange::AlreadyClosed);
                    }
                },

                ConnectionState::Processing(req) => {
                    tracing::info!(
                        method = %req.line.method,
                        target = %req.line.target,
                        body_len = req.body.len(),
                        "request received:\n{}",
                        req
                    );

                    let outcome = req.connection_outcome();

                    tracing::info!(wait = ?self.wait_before_response, "start wait before response");
                    tokio::time::sleep(self.wait_before_response).await;
                    tracing::info!("end wait and start response");

                    let writer = ResponseWriter::new(&Response::hello());
                    self.state = ConnectionState::Writing(writer, outcome);
                }

                ConnectionState::Writing(writer, outcome) => {
                    writer.write_to_stream(&mut self.stream).await?;

                    let outcome = *outcome;
                    self.state = match outcome {
                        ConnectionOutcome::KeepAlive => ConnectionState::Reading,
                        ConnectionOutcome::Close => ConnectionState::Closed,
                    };

                    return Ok(Exchange::Completed(outcome));
                }

                ConnectionState::Closed => {
                    return Ok(Exchange::AlreadyClosed);
                }
            }
        }
    }
}
